use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Diagnostic, Diagnostics};
use crate::geom::{Point, Rect};
use crate::ir::{PlacedRoom, PlanRequest, PlotEnvelope, RoomKind, RoomSpec};

use super::index::SpatialIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Courtyard,
    Rows,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Courtyard => "courtyard",
            LayoutMode::Rows => "rows",
        }
    }
}

/// Solver output: one origin per room id plus everything that went wrong.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanLayout {
    pub mode: LayoutMode,
    pub plot: PlotEnvelope,
    pub positions: BTreeMap<String, Point>,
    pub diagnostics: Diagnostics,
}

impl PlanLayout {
    pub fn origin(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn rect(&self, room: &RoomSpec) -> Option<Rect> {
        self.origin(&room.id).map(|origin| room.rect_at(origin))
    }

    /// Rooms in request order with their solved origins.
    pub fn placed_rooms(&self, request: &PlanRequest) -> Vec<PlacedRoom> {
        request
            .rooms
            .iter()
            .filter_map(|room| {
                self.origin(&room.id).map(|origin| PlacedRoom {
                    spec: room.clone(),
                    origin,
                })
            })
            .collect()
    }
}

/// Read-only view over the request's rooms.
#[derive(Debug, Clone, Copy)]
pub struct RoomSet<'a> {
    rooms: &'a [RoomSpec],
}

impl<'a> RoomSet<'a> {
    pub fn new(rooms: &'a [RoomSpec]) -> Self {
        Self { rooms }
    }

    pub fn get(&self, id: &str) -> Option<&'a RoomSpec> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// First room in input order whose kind satisfies `pred`.
    pub fn first_of(&self, pred: impl Fn(&RoomKind) -> bool) -> Option<&'a RoomSpec> {
        self.rooms.iter().find(|room| pred(&room.kind))
    }

    pub fn iter(&self) -> std::slice::Iter<'a, RoomSpec> {
        self.rooms.iter()
    }
}

/// Placement state threaded by value through every solver step.
#[derive(Debug, Clone)]
pub struct SolverState {
    pub plot: PlotEnvelope,
    positions: BTreeMap<String, Point>,
    index: SpatialIndex,
    diagnostics: Diagnostics,
}

impl SolverState {
    pub fn new(plot: PlotEnvelope) -> Self {
        Self {
            plot,
            positions: BTreeMap::new(),
            index: SpatialIndex::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_origin(mut self, room: &RoomSpec, origin: Point) -> Self {
        self.index.insert(&room.id, room.rect_at(origin));
        self.positions.insert(room.id.clone(), origin);
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn origin(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.index.get(id)
    }

    pub fn is_placed(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn placed_count(&self) -> usize {
        self.positions.len()
    }

    /// True when `rect` lies inside the plot.
    pub fn fits(&self, rect: &Rect) -> bool {
        rect.within(self.plot.width, self.plot.depth)
    }

    pub fn into_parts(self) -> (BTreeMap<String, Point>, Diagnostics) {
        (self.positions, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_origin_replaces_previous_position() {
        let room = RoomSpec::new("a", RoomKind::Living, 10.0, 10.0);
        let state = SolverState::new(PlotEnvelope::new(30.0, 30.0))
            .with_origin(&room, Point::new(0.0, 0.0))
            .with_origin(&room, Point::new(5.0, 5.0));
        assert_eq!(state.placed_count(), 1);
        assert_eq!(state.origin("a"), Some(Point::new(5.0, 5.0)));
        assert_eq!(state.index().len(), 1);
        assert_eq!(state.rect("a"), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn first_of_keeps_input_order() {
        let rooms = vec![
            RoomSpec::new("b1", RoomKind::Bedroom, 10.0, 10.0),
            RoomSpec::new("b2", RoomKind::Bedroom, 12.0, 10.0),
        ];
        let set = RoomSet::new(&rooms);
        assert_eq!(set.first_of(|kind| *kind == RoomKind::Bedroom).map(|r| r.id.as_str()), Some("b1"));
        assert!(set.first_of(|kind| *kind == RoomKind::Kitchen).is_none());
    }
}
