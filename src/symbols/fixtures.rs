use crate::geom::{Point, Rect};
use crate::scene::{Layer, VectorScene};

use super::WALL_OFFSET;

/// Minimum room width and depth, in feet, for a bathtub instead of a shower.
const BATHTUB_MIN_SIDE: f64 = 6.0;

/// Cistern with an elongated bowl in front of it.
pub fn add_toilet(scene: &mut VectorScene, origin: Point) {
    let (tank_w, tank_d) = (1.5, 0.6);
    let (bowl_w, bowl_d) = (1.3, 1.8);
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, tank_w, tank_d));
    let center = Point::new(origin.x + tank_w / 2.0, origin.y + tank_d + bowl_d / 2.0);
    scene.add_ellipse(
        Layer::Fixtures,
        center,
        Point::new(0.0, bowl_d / 2.0),
        bowl_w / bowl_d,
    );
}

pub fn add_wash_basin(scene: &mut VectorScene, origin: Point) {
    let (width, depth) = (2.0, 1.5);
    let (basin_w, basin_d) = (1.2, 0.9);
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, width, depth));
    let center = Point::new(origin.x + width / 2.0, origin.y + depth / 2.0);
    scene.add_ellipse(
        Layer::Fixtures,
        center,
        Point::new(basin_w / 2.0, 0.0),
        basin_d / basin_w,
    );
    scene.add_rect(
        Layer::Fixtures,
        Rect::new(center.x - 0.15, origin.y + depth - 0.1, 0.3, 0.1),
    );
}

pub fn add_shower(scene: &mut VectorScene, origin: Point, size: f64) {
    let (x, y) = (origin.x, origin.y);
    scene.add_rect(Layer::Fixtures, Rect::new(x, y, size, size));
    scene.add_line(Layer::Fixtures, Point::new(x, y), Point::new(x + size, y + size));
    scene.add_line(Layer::Fixtures, Point::new(x + size, y), Point::new(x, y + size));
    scene.add_circle(Layer::Fixtures, Point::new(x + size / 2.0, y + size - 0.3), 0.2);
}

pub fn add_bathtub(scene: &mut VectorScene, origin: Point, width: f64, length: f64) {
    let outer = Rect::new(origin.x, origin.y, width, length);
    scene.add_rect(Layer::Fixtures, outer);
    scene.add_rect(Layer::Fixtures, outer.inset(0.2));
    scene.add_circle(
        Layer::Fixtures,
        Point::new(origin.x + width / 2.0, origin.y + 0.5),
        0.1,
    );
}

/// Counter slab hatched at one-foot intervals.
pub fn add_counter(scene: &mut VectorScene, origin: Point, width: f64, depth: f64) {
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, width, depth));
    for i in 0..width.max(0.0) as usize {
        let x = origin.x + i as f64 + 0.5;
        scene.add_line(Layer::Fixtures, Point::new(x, origin.y), Point::new(x, origin.y + depth));
    }
}

/// Double-basin sink.
pub fn add_kitchen_sink(scene: &mut VectorScene, origin: Point) {
    let (width, depth) = (3.0, 2.0);
    let (basin_w, basin_d) = (1.2, 1.4);
    let margin = (width - basin_w * 2.0) / 3.0;
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, width, depth));
    let basin_y = origin.y + (depth - basin_d) / 2.0;
    for i in 0..2 {
        let bx = origin.x + margin * (i + 1) as f64 + basin_w * i as f64;
        scene.add_rect(Layer::Fixtures, Rect::new(bx, basin_y, basin_w, basin_d));
    }
}

/// Burner centres as fractions of the hob width and depth. Up to two burners
/// sit in one row, more are split over two rows.
fn burner_layout(burners: usize) -> (f64, Vec<(f64, f64)>) {
    if burners <= 2 {
        let step = 1.0 / (burners as f64 + 1.0);
        let spots = (1..=burners).map(|i| (step * i as f64, 0.5)).collect();
        return (2.0, spots);
    }
    let columns = burners.div_ceil(2);
    let spots = (0..burners)
        .map(|i| {
            let (row, column) = (i / columns, i % columns);
            let fx = (2 * column + 1) as f64 / (2 * columns) as f64;
            let fy = if row == 0 { 0.3 } else { 0.7 };
            (fx, fy)
        })
        .collect();
    (1.25 * columns as f64, spots)
}

pub fn add_stove(scene: &mut VectorScene, origin: Point, burners: usize) {
    let depth = 2.0;
    let (width, spots) = burner_layout(burners);
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, width, depth));
    for (fx, fy) in spots {
        scene.add_circle(
            Layer::Fixtures,
            Point::new(origin.x + width * fx, origin.y + depth * fy),
            0.3,
        );
    }
}

pub fn add_refrigerator(scene: &mut VectorScene, origin: Point) {
    let (width, depth) = (3.0, 2.5);
    let mid = origin.x + width / 2.0;
    scene.add_rect(Layer::Fixtures, Rect::new(origin.x, origin.y, width, depth));
    scene.add_line(
        Layer::Fixtures,
        Point::new(mid, origin.y),
        Point::new(mid, origin.y + depth),
    );
    scene.add_text(
        Layer::Fixtures,
        Point::new(mid, origin.y + depth / 2.0),
        0.3,
        "RF",
    );
}

/// Toilet and basin against the north wall; a tub in the south-west corner
/// when the room allows it, otherwise a shower in the south-east corner.
pub fn furnish_bathroom(scene: &mut VectorScene, rect: Rect) {
    add_toilet(
        scene,
        Point::new(rect.x + WALL_OFFSET, rect.top() - 2.5 - WALL_OFFSET),
    );
    add_wash_basin(
        scene,
        Point::new(rect.right() - 2.0 - WALL_OFFSET, rect.top() - 1.5 - WALL_OFFSET),
    );
    if rect.width >= BATHTUB_MIN_SIDE && rect.depth >= BATHTUB_MIN_SIDE {
        add_bathtub(
            scene,
            Point::new(rect.x + WALL_OFFSET, rect.y + WALL_OFFSET),
            2.5,
            5.0,
        );
    } else {
        add_shower(
            scene,
            Point::new(rect.right() - 3.0 - WALL_OFFSET, rect.y + WALL_OFFSET),
            3.0,
        );
    }
}

/// Counter along the north wall carrying the sink and stove, fridge in the
/// south-east corner.
pub fn furnish_kitchen(scene: &mut VectorScene, rect: Rect, burners: usize) {
    let counter_width = rect.width - 2.0 * WALL_OFFSET;
    let counter_y = rect.top() - 2.0 - WALL_OFFSET;
    let counter_x = rect.x + WALL_OFFSET;
    add_counter(scene, Point::new(counter_x, counter_y), counter_width, 2.0);
    add_kitchen_sink(
        scene,
        Point::new(counter_x + counter_width / 2.0 - 1.5, counter_y),
    );
    add_stove(scene, Point::new(counter_x + 0.5, counter_y), burners);
    add_refrigerator(
        scene,
        Point::new(rect.right() - 3.0 - WALL_OFFSET, rect.y + WALL_OFFSET),
    );
}

pub fn furnish_courtyard(scene: &mut VectorScene, rect: Rect) {
    let center = rect.center();
    scene.add_circle(Layer::Furniture, center, 1.0);
    scene.add_text(Layer::Furniture, center, 0.25, "PLANT");
}
