use tracing::debug;

use crate::geom::Point;
use crate::ir::{Direction, RoomKind, RoomSpec};

use super::placement::{place_at_first_free, place_generic};
use super::types::{RoomSet, SolverState};

/// Right of the anchor, then the next row up from it.
fn beside_or_above(state: &SolverState, anchor: &RoomSpec) -> Vec<Point> {
    match state.rect(&anchor.id) {
        Some(rect) => vec![
            Point::new(rect.right(), rect.y),
            Point::new(rect.x, rect.top()),
        ],
        None => Vec::new(),
    }
}

fn verandah_origin(state: &SolverState, verandah: &RoomSpec) -> Point {
    let plot = &state.plot;
    match plot.road_side {
        Direction::West | Direction::South => Point::ORIGIN,
        Direction::North => Point::new(0.0, plot.depth - verandah.depth),
        Direction::East => Point::new(plot.width - verandah.width, 0.0),
    }
}

fn chain(state: SolverState, room: Option<&RoomSpec>, anchor: Option<&RoomSpec>) -> SolverState {
    let Some(room) = room else {
        return state;
    };
    if state.is_placed(&room.id) {
        return state;
    }
    let candidates = anchor
        .filter(|anchor| state.is_placed(&anchor.id))
        .map(|anchor| beside_or_above(&state, anchor))
        .unwrap_or_default();
    if candidates.is_empty() {
        place_generic(state, room)
    } else {
        place_at_first_free(state, room, &candidates)
    }
}

/// Courtyard centred in the plot, then a fixed type-driven chain outward.
pub(super) fn place_courtyard_centric(
    state: SolverState,
    rooms: &RoomSet<'_>,
    courtyard: &RoomSpec,
) -> SolverState {
    let center = Point::new(
        (state.plot.width - courtyard.width) / 2.0,
        (state.plot.depth - courtyard.depth) / 2.0,
    );
    debug!(room = %courtyard.id, x = center.x, y = center.y, "centred courtyard");
    let mut state = state.with_origin(courtyard, center);

    let verandah = rooms.first_of(|kind| *kind == RoomKind::Verandah);
    let living = rooms.first_of(|kind| *kind == RoomKind::Living);
    let dining = rooms.first_of(|kind| *kind == RoomKind::Dining);
    let kitchen = rooms.first_of(|kind| *kind == RoomKind::Kitchen);
    let bedroom = rooms.first_of(|kind| *kind == RoomKind::Bedroom);
    let toilet = rooms.first_of(|kind| matches!(kind, RoomKind::Bathroom | RoomKind::Toilet));
    let staircase = rooms.first_of(|kind| *kind == RoomKind::Staircase);

    if let Some(verandah) = verandah {
        let origin = verandah_origin(&state, verandah);
        state = place_at_first_free(state, verandah, &[origin]);
    }
    state = chain(state, living, verandah);
    state = chain(state, dining, living);
    state = chain(state, kitchen, dining);

    if let Some(bedroom) = bedroom.filter(|room| !state.is_placed(&room.id)) {
        let below_living = living
            .and_then(|living| state.rect(&living.id))
            .map(|rect| vec![Point::new(rect.x, rect.top())])
            .unwrap_or_default();
        state = if below_living.is_empty() {
            place_generic(state, bedroom)
        } else {
            place_at_first_free(state, bedroom, &below_living)
        };
    }

    state = chain(state, toilet, kitchen);
    state = chain(state, staircase, living);

    for room in rooms.iter() {
        if !state.is_placed(&room.id) {
            state = place_generic(state, room);
        }
    }
    state
}
