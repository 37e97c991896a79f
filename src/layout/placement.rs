use tracing::debug;

use crate::error::Diagnostic;
use crate::geom::{OVERLAP_EPSILON, Point, Rect};
use crate::ir::RoomSpec;

use super::types::SolverState;

/// Touching positions around `anchor` for a `width` x `depth` room, in
/// east, west, north, south order.
pub(super) fn touching_candidates(anchor: Rect, width: f64, depth: f64) -> [Point; 4] {
    [
        Point::new(anchor.right(), anchor.y),
        Point::new(anchor.x - width, anchor.y),
        Point::new(anchor.x, anchor.top()),
        Point::new(anchor.x, anchor.y - depth),
    ]
}

/// First candidate that lies in the plot and overlaps nothing outside `ignore`.
pub(super) fn first_free(
    state: &SolverState,
    room: &RoomSpec,
    candidates: &[Point],
    ignore: &[&str],
) -> Option<Point> {
    candidates.iter().copied().find(|origin| {
        let rect = room.rect_at(*origin);
        state.fits(&rect) && !state.index().overlaps_any(&rect, ignore)
    })
}

/// Adjacency-directed placement of `room` against the placed `anchor_id`.
pub(super) fn adjacent_position(
    state: &SolverState,
    anchor_id: &str,
    room: &RoomSpec,
) -> Option<Point> {
    let anchor = state.rect(anchor_id)?;
    let candidates = touching_candidates(anchor, room.width, room.depth);
    first_free(state, room, &candidates, &[anchor_id, room.id.as_str()])
}

/// Row-major scan for the first collision-free origin.
pub(super) fn scan_position(state: &SolverState, room: &RoomSpec) -> Option<Point> {
    let step_y = (room.depth / 2.0).max(1.0);
    let max_x = state.plot.width - room.width + OVERLAP_EPSILON;
    let max_y = state.plot.depth - room.depth + OVERLAP_EPSILON;
    let ignore = [room.id.as_str()];
    let mut y = 0.0;
    while y <= max_y {
        let mut x = 0.0;
        while x <= max_x {
            let rect = Rect::new(x, y, room.width, room.depth);
            match state.index().first_overlap(&rect, &ignore) {
                None => return Some(Point::new(x, y)),
                Some((_, hit)) => x = hit.right().max(x + OVERLAP_EPSILON),
            }
        }
        y += step_y;
    }
    None
}

/// Generic fallback: scan, or the origin with a degeneration diagnostic.
pub(super) fn place_generic(state: SolverState, room: &RoomSpec) -> SolverState {
    match scan_position(&state, room) {
        Some(origin) => {
            debug!(room = %room.id, x = origin.x, y = origin.y, "placed by scan");
            state.with_origin(room, origin)
        }
        None => {
            debug!(room = %room.id, "scan exhausted, placing at origin");
            state
                .with_origin(room, Point::ORIGIN)
                .with_diagnostic(Diagnostic::PlacementDegeneration {
                    room: room.id.clone(),
                })
        }
    }
}

/// Tries each already placed declared neighbour in order, then falls back.
pub(super) fn place_near_neighbors(state: SolverState, room: &RoomSpec) -> SolverState {
    let found = room
        .adjacent_to
        .iter()
        .filter(|neighbor| *neighbor != &room.id && state.is_placed(neighbor))
        .find_map(|neighbor| adjacent_position(&state, neighbor, room));
    match found {
        Some(origin) => {
            debug!(room = %room.id, x = origin.x, y = origin.y, "placed beside neighbour");
            state.with_origin(room, origin)
        }
        None => place_generic(state, room),
    }
}

/// Places `room` at the first free candidate, else by the generic fallback.
pub(super) fn place_at_first_free(
    state: SolverState,
    room: &RoomSpec,
    candidates: &[Point],
) -> SolverState {
    match first_free(&state, room, candidates, &[room.id.as_str()]) {
        Some(origin) => {
            debug!(room = %room.id, x = origin.x, y = origin.y, "placed at candidate");
            state.with_origin(room, origin)
        }
        None => place_generic(state, room),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{PlotEnvelope, RoomKind};

    fn state_with(rooms: &[(&RoomSpec, Point)]) -> SolverState {
        rooms.iter().fold(
            SolverState::new(PlotEnvelope::new(30.0, 40.0)),
            |state, (room, origin)| state.with_origin(room, *origin),
        )
    }

    #[test]
    fn adjacent_prefers_east_then_west() {
        let anchor = RoomSpec::new("a", RoomKind::Living, 15.0, 12.0);
        let state = state_with(&[(&anchor, Point::new(0.0, 0.0))]);
        let room = RoomSpec::new("b", RoomKind::Dining, 10.0, 8.0);
        assert_eq!(adjacent_position(&state, "a", &room), Some(Point::new(15.0, 0.0)));

        let wide = RoomSpec::new("c", RoomKind::Dining, 16.0, 8.0);
        assert_eq!(adjacent_position(&state, "a", &wide), Some(Point::new(0.0, 12.0)));
    }

    #[test]
    fn scan_skips_past_colliders() {
        let a = RoomSpec::new("a", RoomKind::Living, 15.0, 12.0);
        let b = RoomSpec::new("b", RoomKind::Dining, 10.0, 8.0);
        let state = state_with(&[(&a, Point::new(0.0, 0.0)), (&b, Point::new(15.0, 0.0))]);
        let room = RoomSpec::new("c", RoomKind::Store, 5.0, 5.0);
        assert_eq!(scan_position(&state, &room), Some(Point::new(25.0, 0.0)));

        let big = RoomSpec::new("d", RoomKind::Store, 10.0, 10.0);
        let origin = scan_position(&state, &big).unwrap();
        assert!(!state.index().overlaps_any(&big.rect_at(origin), &[]));
        assert!(origin.y > 0.0);
    }

    #[test]
    fn exhausted_scan_degenerates_to_origin() {
        let a = RoomSpec::new("a", RoomKind::Living, 30.0, 40.0);
        let state = state_with(&[(&a, Point::ORIGIN)]);
        let room = RoomSpec::new("b", RoomKind::Store, 5.0, 5.0);
        let state = place_generic(state, &room);
        assert_eq!(state.origin("b"), Some(Point::ORIGIN));
        let (_, diagnostics) = state.into_parts();
        assert_eq!(
            diagnostics.as_slice(),
            [Diagnostic::PlacementDegeneration { room: "b".into() }]
        );
    }
}
