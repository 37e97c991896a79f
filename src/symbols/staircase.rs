use tracing::debug;

use crate::geom::{Point, Rect};
use crate::ir::{StaircaseKind, StaircaseSpec};
use crate::scene::{Layer, VectorScene};

/// Gap between the two parallel flights of a U-shaped stair.
const U_FLIGHT_GAP: f64 = 0.5;
const SPIRAL_COLUMN: f64 = 0.5;
const SPIRAL_SPOKE_DEGREES: usize = 30;

/// Derived sizes of a drawn staircase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StairGeometry {
    pub steps: u32,
    /// Total run of all flights, in feet.
    pub run_length: f64,
    pub landing: Option<Rect>,
    pub footprint: Rect,
}

pub fn step_count(spec: &StaircaseSpec, floor_height_inches: f64) -> u32 {
    (floor_height_inches / spec.riser_height_inches).ceil().max(1.0) as u32
}

pub fn run_length(spec: &StaircaseSpec, steps: u32) -> f64 {
    steps as f64 * spec.tread_depth_inches / 12.0
}

/// Draws the staircase with its first flight starting at `origin` and
/// returns what was drawn.
pub fn add_staircase(
    scene: &mut VectorScene,
    spec: &StaircaseSpec,
    origin: Point,
    floor_height_inches: f64,
) -> StairGeometry {
    let steps = step_count(spec, floor_height_inches);
    let run = run_length(spec, steps);
    let width = spec.width_feet;
    let (landing, footprint) = match spec.kind {
        StaircaseKind::Straight => {
            add_flight(scene, origin, width, run, steps);
            (None, Rect::at(origin, width, run))
        }
        StaircaseKind::LShaped => add_l_shaped(scene, origin, width, run, steps),
        StaircaseKind::UShaped => add_u_shaped(scene, origin, width, run, steps),
        StaircaseKind::Spiral => {
            add_spiral(scene, origin, width);
            (None, Rect::at(origin, width, width))
        }
    };
    debug!(kind = ?spec.kind, steps, run, "staircase drawn");
    StairGeometry {
        steps,
        run_length: run,
        landing,
        footprint,
    }
}

/// Straight flight travelling north: outline, treads, arrow and "UP".
fn add_flight(scene: &mut VectorScene, origin: Point, width: f64, length: f64, steps: u32) {
    let (x, y) = (origin.x, origin.y);
    scene.add_rect(Layer::Stairs, Rect::new(x, y, width, length));
    add_treads(scene, origin, width, length, steps, Travel::North);

    let mid = x + width / 2.0;
    let head = Point::new(mid, y + length * 0.8);
    scene.add_line(Layer::Stairs, Point::new(mid, y + length * 0.2), head);
    scene.add_line(Layer::Stairs, head.offset(-0.2, -0.3), head);
    scene.add_line(Layer::Stairs, head.offset(0.2, -0.3), head);
    scene.add_text(Layer::Stairs, Point::new(mid, y + 0.3), 0.2, "UP");
}

#[derive(Debug, Clone, Copy)]
enum Travel {
    North,
    South,
    West,
}

/// Tread lines inside the flight rectangle anchored at `origin`.
fn add_treads(
    scene: &mut VectorScene,
    origin: Point,
    width: f64,
    length: f64,
    steps: u32,
    travel: Travel,
) {
    if steps == 0 {
        return;
    }
    let depth = length / steps as f64;
    for i in 1..steps {
        let along = i as f64 * depth;
        let (start, end) = match travel {
            Travel::North => (
                Point::new(origin.x, origin.y + along),
                Point::new(origin.x + width, origin.y + along),
            ),
            Travel::South => (
                Point::new(origin.x, origin.y + length - along),
                Point::new(origin.x + width, origin.y + length - along),
            ),
            // `origin` is the landing-side end; the flight runs west of it
            Travel::West => (
                Point::new(origin.x - along, origin.y),
                Point::new(origin.x - along, origin.y + width),
            ),
        };
        scene.add_line(Layer::Stairs, start, end);
    }
}

/// Half the steps north, a square landing, the rest west.
fn add_l_shaped(
    scene: &mut VectorScene,
    origin: Point,
    width: f64,
    run: f64,
    steps: u32,
) -> (Option<Rect>, Rect) {
    let first_steps = steps / 2;
    let half = run / 2.0;
    add_flight(scene, origin, width, half, first_steps);

    let landing = Rect::new(origin.x, origin.y + half, width, width);
    scene.add_rect(Layer::Stairs, landing);

    let second = Rect::new(origin.x - half, landing.y, half, width);
    scene.add_rect(Layer::Stairs, second);
    add_treads(
        scene,
        Point::new(origin.x, landing.y),
        width,
        half,
        steps - first_steps,
        Travel::West,
    );

    let footprint = Rect::new(second.x, origin.y, half + width, half + width);
    (Some(landing), footprint)
}

/// Up one flight, across a landing, back down a parallel flight.
fn add_u_shaped(
    scene: &mut VectorScene,
    origin: Point,
    width: f64,
    run: f64,
    steps: u32,
) -> (Option<Rect>, Rect) {
    let flight_steps = steps / 3;
    let flight = run / 3.0;
    add_flight(scene, origin, width, flight, flight_steps);

    let landing = Rect::new(
        origin.x,
        origin.y + flight,
        width * 2.0 + U_FLIGHT_GAP,
        width,
    );
    scene.add_rect(Layer::Stairs, landing);

    let second = Point::new(origin.x + width + U_FLIGHT_GAP, origin.y);
    scene.add_rect(Layer::Stairs, Rect::at(second, width, flight));
    add_treads(scene, second, width, flight, flight_steps, Travel::South);

    let footprint = Rect::at(origin, landing.width, flight + width);
    (Some(landing), footprint)
}

/// Circular footprint, central column and a spoke per step boundary.
fn add_spiral(scene: &mut VectorScene, origin: Point, diameter: f64) {
    let radius = diameter / 2.0;
    let column = SPIRAL_COLUMN.min(radius / 2.0);
    let center = origin.offset(radius, radius);
    scene.add_circle(Layer::Stairs, center, radius);
    scene.add_circle(Layer::Stairs, center, column);
    for degrees in (0..360).step_by(SPIRAL_SPOKE_DEGREES) {
        let (sin, cos) = (degrees as f64).to_radians().sin_cos();
        scene.add_line(
            Layer::Stairs,
            center.offset(column * cos, column * sin),
            center.offset(radius * cos, radius * sin),
        );
    }
    scene.add_text(Layer::Stairs, center, 0.15, "SPIRAL");
}
