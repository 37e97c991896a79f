use crate::geom::{OVERLAP_EPSILON, Rect};

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    rect: Rect,
}

/// Placed rectangles kept sorted by min-x. Overlap queries sweep from the
/// left and stop once an entry starts past the query's right edge.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    entries: Vec<Entry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or moves `id`.
    pub fn insert(&mut self, id: &str, rect: Rect) {
        self.remove(id);
        let at = self
            .entries
            .partition_point(|entry| (entry.rect.x, entry.id.as_str()) < (rect.x, id));
        self.entries.insert(
            at,
            Entry {
                id: id.to_string(),
                rect,
            },
        );
    }

    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(pos).rect)
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.rect)
    }

    fn sweep_end(&self, rect: &Rect) -> usize {
        self.entries
            .partition_point(|entry| entry.rect.x < rect.right() - OVERLAP_EPSILON)
    }

    /// Entries whose interior intersects `rect`, leftmost first.
    pub fn overlapping(&self, rect: &Rect, ignore: &[&str]) -> Vec<(&str, Rect)> {
        self.entries[..self.sweep_end(rect)]
            .iter()
            .filter(|entry| !is_ignored(ignore, &entry.id) && entry.rect.overlaps(rect))
            .map(|entry| (entry.id.as_str(), entry.rect))
            .collect()
    }

    pub fn first_overlap(&self, rect: &Rect, ignore: &[&str]) -> Option<(&str, Rect)> {
        self.entries[..self.sweep_end(rect)]
            .iter()
            .find(|entry| !is_ignored(ignore, &entry.id) && entry.rect.overlaps(rect))
            .map(|entry| (entry.id.as_str(), entry.rect))
    }

    pub fn overlaps_any(&self, rect: &Rect, ignore: &[&str]) -> bool {
        self.first_overlap(rect, ignore).is_some()
    }
}

fn is_ignored(ignore: &[&str], id: &str) -> bool {
    ignore.iter().any(|skip| *skip == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_finds_only_true_overlaps() {
        let mut index = SpatialIndex::new();
        index.insert("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        index.insert("b", Rect::new(10.0, 0.0, 5.0, 5.0));
        index.insert("c", Rect::new(30.0, 0.0, 5.0, 5.0));

        let probe = Rect::new(8.0, 2.0, 4.0, 2.0);
        let hits: Vec<&str> = index
            .overlapping(&probe, &[])
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, vec!["a", "b"]);
        assert_eq!(index.first_overlap(&probe, &["a"]).map(|(id, _)| id), Some("b"));

        let touching = Rect::new(15.0, 0.0, 5.0, 5.0);
        assert!(!index.overlaps_any(&touching, &[]));
    }

    #[test]
    fn insert_moves_existing_entry() {
        let mut index = SpatialIndex::new();
        index.insert("a", Rect::new(20.0, 0.0, 5.0, 5.0));
        index.insert("b", Rect::new(10.0, 0.0, 5.0, 5.0));
        index.insert("a", Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a"), Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        assert!(index.overlaps_any(&Rect::new(1.0, 1.0, 1.0, 1.0), &[]));
        assert!(!index.overlaps_any(&Rect::new(21.0, 1.0, 1.0, 1.0), &[]));
    }
}
