use tracing::debug;

use crate::geom::Point;
use crate::ir::{RoomKind, RoomSpec};

use super::placement::place_near_neighbors;
use super::types::{RoomSet, SolverState};

#[derive(Debug, Clone, Copy)]
struct RowCursor {
    x: f64,
    y: f64,
    height: f64,
}

impl RowCursor {
    fn at(y: f64) -> Self {
        Self { x: 0.0, y, height: 0.0 }
    }

    fn next(&self) -> Self {
        Self::at(self.y + self.height)
    }
}

/// Appends `room` to the row when it fits; otherwise leaves it for the
/// neighbour/scan pass.
fn push(state: SolverState, row: &mut RowCursor, room: Option<&RoomSpec>) -> SolverState {
    let Some(room) = room else {
        return state;
    };
    if state.is_placed(&room.id) {
        return state;
    }
    let origin = Point::new(row.x, row.y);
    let rect = room.rect_at(origin);
    if !state.fits(&rect) || state.index().overlaps_any(&rect, &[room.id.as_str()]) {
        debug!(room = %room.id, row_y = row.y, "room deferred from row");
        return state;
    }
    debug!(room = %room.id, x = origin.x, y = origin.y, "placed in row");
    row.x += room.width;
    row.height = row.height.max(room.depth);
    state.with_origin(room, origin)
}

/// Front, service and private rows, then everything else beside a neighbour.
pub(super) fn place_rows(state: SolverState, rooms: &RoomSet<'_>) -> SolverState {
    let verandah = rooms.first_of(|kind| *kind == RoomKind::Verandah);
    let living = rooms.first_of(|kind| *kind == RoomKind::Living);
    let dining = rooms.first_of(|kind| *kind == RoomKind::Dining);
    let kitchen = rooms.first_of(|kind| *kind == RoomKind::Kitchen);
    let toilet = rooms.first_of(|kind| matches!(kind, RoomKind::Bathroom | RoomKind::Toilet));
    let staircase = rooms.first_of(|kind| *kind == RoomKind::Staircase);
    let bedroom = rooms.first_of(|kind| *kind == RoomKind::Bedroom);

    let mut row = RowCursor::at(0.0);
    let mut state = push(state, &mut row, verandah);
    state = push(state, &mut row, living);
    state = push(state, &mut row, dining);

    let mut row = row.next();
    state = push(state, &mut row, dining);
    state = push(state, &mut row, kitchen);
    state = push(state, &mut row, toilet);
    state = push(state, &mut row, staircase);

    let mut row = row.next();
    state = push(state, &mut row, bedroom);

    for room in rooms.iter() {
        if !state.is_placed(&room.id) {
            state = place_near_neighbors(state, room);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PlotEnvelope;

    #[test]
    fn rows_stack_by_tallest_room() {
        let rooms = vec![
            RoomSpec::new("ver", RoomKind::Verandah, 10.0, 6.0),
            RoomSpec::new("liv", RoomKind::Living, 15.0, 12.0),
            RoomSpec::new("kit", RoomKind::Kitchen, 10.0, 8.0),
            RoomSpec::new("wc", RoomKind::Toilet, 5.0, 6.0),
            RoomSpec::new("bed", RoomKind::Bedroom, 12.0, 12.0),
        ];
        let set = RoomSet::new(&rooms);
        let state = place_rows(SolverState::new(PlotEnvelope::new(30.0, 40.0)), &set);
        assert_eq!(state.origin("ver"), Some(Point::new(0.0, 0.0)));
        assert_eq!(state.origin("liv"), Some(Point::new(10.0, 0.0)));
        assert_eq!(state.origin("kit"), Some(Point::new(0.0, 12.0)));
        assert_eq!(state.origin("wc"), Some(Point::new(10.0, 12.0)));
        assert_eq!(state.origin("bed"), Some(Point::new(0.0, 20.0)));
    }

    #[test]
    fn dining_that_misses_row_one_leads_row_two() {
        let rooms = vec![
            RoomSpec::new("liv", RoomKind::Living, 22.0, 12.0),
            RoomSpec::new("din", RoomKind::Dining, 10.0, 8.0),
            RoomSpec::new("kit", RoomKind::Kitchen, 10.0, 8.0),
        ];
        let set = RoomSet::new(&rooms);
        let state = place_rows(SolverState::new(PlotEnvelope::new(30.0, 40.0)), &set);
        assert_eq!(state.origin("din"), Some(Point::new(0.0, 12.0)));
        assert_eq!(state.origin("kit"), Some(Point::new(10.0, 12.0)));
    }

    #[test]
    fn leftovers_go_beside_a_placed_neighbour() {
        let rooms = vec![
            RoomSpec::new("liv", RoomKind::Living, 15.0, 12.0),
            RoomSpec::new("pooja", RoomKind::Pooja, 5.0, 5.0).adjacent(&["liv"]),
            RoomSpec::new("store", RoomKind::Store, 4.0, 4.0),
        ];
        let set = RoomSet::new(&rooms);
        let state = place_rows(SolverState::new(PlotEnvelope::new(30.0, 40.0)), &set);
        assert_eq!(state.origin("pooja"), Some(Point::new(15.0, 0.0)));
        assert_eq!(state.origin("store"), Some(Point::new(20.0, 0.0)));
    }
}
