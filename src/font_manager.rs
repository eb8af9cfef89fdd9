//! System font lookup and text measurement.
//!
//! Fonts are resolved through `fontdb` and cached for the lifetime of the
//! process. When a family cannot be resolved (headless machines, stripped
//! containers) measurement falls back to deterministic heuristic metrics so
//! that annotation sizing never fails.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

use crate::model::FontDesc;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All families known to the system database, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut out: Vec<String> = db()
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Resolves a cached `rusttype` font for the requested family and style.
/// Returns `None` when neither the family nor a generic fallback can be
/// loaded; callers degrade to heuristic metrics.
pub fn get_font_for(family: &str, bold: bool, italic: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(entry) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *entry;
    }

    let loaded = load_font_from_system(family, bold, italic)
        .or_else(|| load_font_from_system("Sans", bold, italic))
        .map(|font| &*Box::leak(Box::new(font)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

// Heuristic metrics used when no system font resolves. Chosen to stay in
// the ballpark of common sans faces so layout stays usable.
const FALLBACK_ADVANCE_EM: f64 = 0.6;
const FALLBACK_LINE_EM: f64 = 1.2;

/// Height of one text line for the given descriptor.
pub fn line_height(font: &FontDesc) -> f64 {
    match get_font_for(&font.family, font.bold, font.italic) {
        Some(f) => {
            let m = f.v_metrics(Scale::uniform(font.size));
            (m.ascent - m.descent + m.line_gap) as f64
        }
        None => font.size as f64 * FALLBACK_LINE_EM,
    }
}

/// Baseline offset from the top of a line box.
pub fn ascent(font: &FontDesc) -> f64 {
    match get_font_for(&font.family, font.bold, font.italic) {
        Some(f) => f.v_metrics(Scale::uniform(font.size)).ascent as f64,
        None => font.size as f64,
    }
}

/// Advance width of a single line (no newlines expected).
pub fn measure_line(line: &str, font: &FontDesc) -> f64 {
    match get_font_for(&font.family, font.bold, font.italic) {
        Some(f) => {
            let scale = Scale::uniform(font.size);
            let mut width = 0.0f32;
            for glyph in f.layout(line, scale, rt_point(0.0, 0.0)) {
                let end = glyph.position().x + glyph.unpositioned().h_metrics().advance_width;
                width = width.max(end);
            }
            width as f64
        }
        None => line.chars().count() as f64 * font.size as f64 * FALLBACK_ADVANCE_EM,
    }
}

/// Measures a text block, respecting embedded newlines. Returns the widest
/// line width and the stacked line height. An empty string still occupies
/// one line.
pub fn measure_block(text: &str, font: &FontDesc) -> (f64, f64) {
    let mut width = 0.0f64;
    let mut lines = 0usize;
    for line in text.split('\n') {
        width = width.max(measure_line(line, font));
        lines += 1;
    }
    let lines = lines.max(1);
    (width, lines as f64 * line_height(font))
}
