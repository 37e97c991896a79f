use tracing::debug;

use crate::config::RepairKind;
use crate::geom::Point;
use crate::ir::RoomSpec;

use super::graph::AdjacencyGraph;
use super::placement::adjacent_position;
use super::types::{RoomSet, SolverState};

/// Post-placement pass that tries to make declared neighbours share a wall.
pub trait RepairStrategy {
    fn name(&self) -> &'static str;

    fn repair(
        &self,
        state: SolverState,
        rooms: &RoomSet<'_>,
        graph: &AdjacencyGraph,
        tolerance: f64,
    ) -> SolverState;
}

pub fn strategy_for(kind: RepairKind) -> Box<dyn RepairStrategy> {
    match kind {
        RepairKind::Greedy => Box::new(GreedyRepair),
        RepairKind::Conservative => Box::new(ConservativeRepair),
        RepairKind::None => Box::new(NoRepair),
    }
}

pub(super) fn shares_wall(state: &SolverState, a: &str, b: &str, tolerance: f64) -> bool {
    match (state.rect(a), state.rect(b)) {
        (Some(a), Some(b)) => a.shares_wall(&b, tolerance),
        _ => false,
    }
}

/// Degree-first walk shared by the greedy and conservative strategies;
/// `accept` decides whether a proposed move is kept.
fn degree_first(
    mut state: SolverState,
    rooms: &RoomSet<'_>,
    graph: &AdjacencyGraph,
    tolerance: f64,
    accept: impl Fn(&SolverState, &RoomSpec, Point) -> bool,
) -> SolverState {
    for id in graph.by_degree(rooms.iter()) {
        if !state.is_placed(id) {
            continue;
        }
        for neighbor_id in graph.neighbors(id) {
            if neighbor_id == id || !state.is_placed(neighbor_id) {
                continue;
            }
            let Some(neighbor) = rooms.get(neighbor_id) else {
                continue;
            };
            if shares_wall(&state, id, neighbor_id, tolerance) {
                continue;
            }
            let Some(origin) = adjacent_position(&state, id, neighbor) else {
                continue;
            };
            if accept(&state, neighbor, origin) {
                debug!(room = %neighbor.id, anchor = %id, x = origin.x, y = origin.y, "moved next to neighbour");
                state = state.with_origin(neighbor, origin);
            }
        }
    }
    state
}

/// Moves a neighbour beside the current room whenever a free touching slot
/// exists, even if that breaks one of its other adjacencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyRepair;

impl RepairStrategy for GreedyRepair {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn repair(
        &self,
        state: SolverState,
        rooms: &RoomSet<'_>,
        graph: &AdjacencyGraph,
        tolerance: f64,
    ) -> SolverState {
        degree_first(state, rooms, graph, tolerance, |_, _, _| true)
    }
}

/// Like [`GreedyRepair`] but refuses a move that would break a wall the
/// moved room already shares with another declared neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeRepair;

impl RepairStrategy for ConservativeRepair {
    fn name(&self) -> &'static str {
        "conservative"
    }

    fn repair(
        &self,
        state: SolverState,
        rooms: &RoomSet<'_>,
        graph: &AdjacencyGraph,
        tolerance: f64,
    ) -> SolverState {
        degree_first(state, rooms, graph, tolerance, |state, moved, origin| {
            let moved_rect = moved.rect_at(origin);
            graph.neighbors(&moved.id).iter().all(|other| {
                if *other == moved.id || !shares_wall(state, &moved.id, other, tolerance) {
                    return true;
                }
                state
                    .rect(other)
                    .is_some_and(|rect| rect.shares_wall(&moved_rect, tolerance))
            })
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepair;

impl RepairStrategy for NoRepair {
    fn name(&self) -> &'static str {
        "none"
    }

    fn repair(
        &self,
        state: SolverState,
        _rooms: &RoomSet<'_>,
        _graph: &AdjacencyGraph,
        _tolerance: f64,
    ) -> SolverState {
        state
    }
}
