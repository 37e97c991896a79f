use std::collections::BTreeMap;

use crate::ir::RoomSpec;

/// Undirected view of the declared one-way `adjacent_to` lists.
///
/// Each room keeps its declared neighbours first, in declaration order,
/// followed by reverse edges in room order. Ids that name no room still get
/// an entry; self references are kept as declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl AdjacencyGraph {
    pub fn build(rooms: &[RoomSpec]) -> Self {
        let mut edges: BTreeMap<String, Vec<String>> = rooms
            .iter()
            .map(|room| (room.id.clone(), room.adjacent_to.clone()))
            .collect();
        for room in rooms {
            for neighbor in &room.adjacent_to {
                let back = edges.entry(neighbor.clone()).or_default();
                if !back.contains(&room.id) {
                    back.push(room.id.clone());
                }
            }
        }
        Self { edges }
    }

    pub fn neighbors(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: &str) -> usize {
        self.neighbors(id).len()
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.neighbors(a).iter().any(|n| n == b)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Room ids in input order, stably sorted by descending degree.
    pub fn by_degree<'a>(&self, rooms: impl Iterator<Item = &'a RoomSpec>) -> Vec<&'a str> {
        let mut ids: Vec<&str> = rooms.map(|room| room.id.as_str()).collect();
        ids.sort_by_key(|id| std::cmp::Reverse(self.degree(id)));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RoomKind;

    fn rooms() -> Vec<RoomSpec> {
        vec![
            RoomSpec::new("living", RoomKind::Living, 15.0, 12.0).adjacent(&["kitchen", "dining"]),
            RoomSpec::new("kitchen", RoomKind::Kitchen, 10.0, 8.0).adjacent(&["living"]),
            RoomSpec::new("dining", RoomKind::Dining, 10.0, 8.0).adjacent(&["living", "kitchen"]),
        ]
    }

    #[test]
    fn reverse_edges_follow_declared_ones() {
        let graph = AdjacencyGraph::build(&rooms());
        assert_eq!(graph.neighbors("living"), ["kitchen", "dining"]);
        assert_eq!(graph.neighbors("kitchen"), ["living", "dining"]);
        assert_eq!(graph.neighbors("dining"), ["living", "kitchen"]);
        assert!(graph.contains_edge("kitchen", "dining"));
    }

    #[test]
    fn dangling_and_self_references_are_kept() {
        let rooms = vec![RoomSpec::new("a", RoomKind::Store, 5.0, 5.0).adjacent(&["a", "ghost"])];
        let graph = AdjacencyGraph::build(&rooms);
        assert_eq!(graph.neighbors("a"), ["a", "ghost"]);
        assert_eq!(graph.neighbors("ghost"), ["a"]);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn degree_order_is_stable() {
        let rooms = rooms();
        let graph = AdjacencyGraph::build(&rooms);
        assert_eq!(graph.by_degree(rooms.iter()), vec!["living", "kitchen", "dining"]);
    }
}
