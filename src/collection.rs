//! Ordered annotation collection with single selection.
//!
//! Vec order is the z-order: index 0 draws first (backmost), the last
//! element draws last (topmost). Every annotation's `z_order` field is a
//! cache of its index, reassigned after every structural change.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{Point, Rect};
use crate::model::Annotation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationCollection {
    annotations: Vec<Annotation>,
    selected_id: Option<u64>,
    next_id: u64,
}

impl Default for AnnotationCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationCollection {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            selected_id: None,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Appends an annotation on top. A zero id gets a fresh one assigned;
    /// nonzero ids are preserved so undo can restore an annotation under
    /// its original identity.
    pub fn add(&mut self, annotation: Annotation) -> u64 {
        let index = self.annotations.len();
        self.insert(index, annotation)
    }

    /// Inserts at a specific z position. Same id rules as [`add`].
    ///
    /// [`add`]: Self::add
    pub fn insert(&mut self, index: usize, mut annotation: Annotation) -> u64 {
        if annotation.id == 0 {
            annotation.id = self.next_id;
            self.next_id += 1;
        } else {
            self.next_id = self.next_id.max(annotation.id + 1);
        }
        let id = annotation.id;
        let index = index.min(self.annotations.len());
        trace!(id, index, kind = ?annotation.kind(), "insert annotation");
        self.annotations.insert(index, annotation);
        self.update_z_orders();
        id
    }

    /// Removes by id; returns whether it was present. Removing the
    /// selected annotation clears the selection.
    pub fn remove(&mut self, id: u64) -> bool {
        self.remove_take(id).is_some()
    }

    /// Removes by id, returning the annotation and the index it occupied.
    pub fn remove_take(&mut self, id: u64) -> Option<(usize, Annotation)> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        let mut annotation = self.annotations.remove(index);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        annotation.selected = false;
        self.update_z_orders();
        trace!(id, index, "remove annotation");
        Some((index, annotation))
    }

    pub fn get(&self, id: u64) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    /// Selects the annotation with the given id, clearing any previous
    /// selection. `None` clears the selection. A stale id just clears.
    pub fn select_annotation(&mut self, id: Option<u64>) {
        self.clear_selection();
        if let Some(id) = id {
            if let Some(annotation) = self.get_mut(id) {
                annotation.selected = true;
                self.selected_id = Some(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selected_id.take() {
            if let Some(annotation) = self.get_mut(previous) {
                annotation.selected = false;
            }
        }
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    pub fn selected(&self) -> Option<&Annotation> {
        self.get(self.selected_id?)
    }

    pub fn selected_mut(&mut self) -> Option<&mut Annotation> {
        let id = self.selected_id?;
        self.get_mut(id)
    }

    /// Topmost annotation under the point, if any.
    pub fn hit_test(&self, p: Point) -> Option<&Annotation> {
        self.annotations.iter().rev().find(|a| a.hit_test(p))
    }

    /// All annotations touching the query rectangle, topmost first. An
    /// annotation qualifies when its bounds intersect the query or lie
    /// fully inside it.
    pub fn hit_test_rect(&self, query: &Rect) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .rev()
            .filter(|a| {
                let bounds = a.bounds();
                bounds.intersects(query) || query.contains_rect(&bounds)
            })
            .collect()
    }

    /// Moves the annotation to the top of the draw order.
    pub fn bring_to_front(&mut self, id: u64) -> bool {
        let Some(index) = self.annotations.iter().position(|a| a.id == id) else {
            return false;
        };
        let annotation = self.annotations.remove(index);
        self.annotations.push(annotation);
        self.update_z_orders();
        true
    }

    /// Moves the annotation to the bottom of the draw order.
    pub fn send_to_back(&mut self, id: u64) -> bool {
        let Some(index) = self.annotations.iter().position(|a| a.id == id) else {
            return false;
        };
        let annotation = self.annotations.remove(index);
        self.annotations.insert(0, annotation);
        self.update_z_orders();
        true
    }

    fn update_z_orders(&mut self) {
        for (index, annotation) in self.annotations.iter_mut().enumerate() {
            annotation.z_order = index;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Annotation> {
        self.annotations.iter_mut()
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
        self.selected_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn rect_at(x: f64) -> Annotation {
        Annotation::rectangle(Rect::new(x, 0.0, 50.0, 50.0))
    }

    #[test]
    fn test_z_order_mirrors_index() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        let b = c.add(rect_at(10.0));
        c.add(rect_at(20.0));
        c.send_to_back(b);
        c.remove(a);
        for (index, annotation) in c.iter().enumerate() {
            assert_eq!(annotation.z_order, index);
        }
    }

    #[test]
    fn test_hit_test_returns_topmost() {
        let mut c = AnnotationCollection::new();
        c.add(rect_at(0.0));
        let top = c.add(rect_at(0.0));
        let hit = c.hit_test(Point::new(25.0, 25.0)).unwrap();
        assert_eq!(hit.id, top);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        let b = c.add(rect_at(10.0));
        c.select_annotation(Some(a));
        c.select_annotation(Some(b));
        assert_eq!(c.selected_id(), Some(b));
        assert_eq!(c.iter().filter(|a| a.selected).count(), 1);
        assert!(!c.get(a).unwrap().selected);
    }

    #[test]
    fn test_select_none_clears() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        c.select_annotation(Some(a));
        c.select_annotation(None);
        assert_eq!(c.selected_id(), None);
        assert!(!c.get(a).unwrap().selected);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        c.select_annotation(Some(a));
        assert!(c.remove(a));
        assert_eq!(c.selected_id(), None);
        assert!(!c.remove(a));
    }

    #[test]
    fn test_restored_id_is_not_reissued() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        let (index, taken) = c.remove_take(a).unwrap();
        c.insert(index, taken);
        let b = c.add(rect_at(10.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_rect_hit_test_topmost_first() {
        let mut c = AnnotationCollection::new();
        let back = c.add(rect_at(0.0));
        let front = c.add(rect_at(20.0));
        c.add(rect_at(500.0));
        let query = Rect::new(0.0, 0.0, 80.0, 80.0);
        let hits: Vec<u64> = c.hit_test_rect(&query).iter().map(|a| a.id).collect();
        assert_eq!(hits, vec![front, back]);
    }

    #[test]
    fn test_bring_to_front_and_send_to_back() {
        let mut c = AnnotationCollection::new();
        let a = c.add(rect_at(0.0));
        let b = c.add(rect_at(10.0));
        let ids = |c: &AnnotationCollection| c.iter().map(|a| a.id).collect::<Vec<_>>();
        assert!(c.bring_to_front(a));
        assert_eq!(ids(&c), vec![b, a]);
        assert!(c.send_to_back(a));
        assert_eq!(ids(&c), vec![a, b]);
        assert!(!c.bring_to_front(999));
    }
}
