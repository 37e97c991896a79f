use crate::geom::{Point, Rect};
use crate::scene::{Layer, VectorScene};

use super::WALL_OFFSET;

const BED_DEPTH: f64 = 6.5;
const HEADBOARD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedSize {
    Single,
    Double,
    Queen,
    King,
}

impl BedSize {
    pub fn width(&self) -> f64 {
        match self {
            BedSize::Single => 3.0,
            BedSize::Double => 4.5,
            BedSize::Queen => 5.0,
            BedSize::King => 6.0,
        }
    }
}

/// Bed with its headboard at the top edge; `origin` is the foot-left corner.
pub fn add_bed(scene: &mut VectorScene, origin: Point, size: BedSize) {
    let width = size.width();
    let (x, y) = (origin.x, origin.y);
    scene.add_rect(Layer::Furniture, Rect::new(x, y, width, BED_DEPTH));
    scene.add_rect(
        Layer::Furniture,
        Rect::new(x, y + BED_DEPTH - HEADBOARD, width, HEADBOARD),
    );

    let pillow_width = width * 0.4;
    let pillow_depth = 0.5;
    let margin = (width - pillow_width * 2.0) / 3.0;
    let pillow_y = y + BED_DEPTH - HEADBOARD - pillow_depth - 0.2;
    let pillows = if size == BedSize::Single { 1 } else { 2 };
    for i in 0..pillows {
        let px = x + margin * (i + 1) as f64 + pillow_width * i as f64;
        scene.add_rect(
            Layer::Furniture,
            Rect::new(px, pillow_y, pillow_width, pillow_depth),
        );
    }
}

/// Two-door wardrobe with handles either side of the split.
pub fn add_wardrobe(scene: &mut VectorScene, origin: Point, width: f64, depth: f64) {
    let (x, y) = (origin.x, origin.y);
    let mid = x + width / 2.0;
    scene.add_rect(Layer::Furniture, Rect::new(x, y, width, depth));
    scene.add_line(Layer::Furniture, Point::new(mid, y), Point::new(mid, y + depth));
    for dx in [-0.3, 0.3] {
        scene.add_circle(Layer::Furniture, Point::new(mid + dx, y + depth / 2.0), 0.1);
    }
}

/// Three-seater facing south, backrest along the top edge.
pub fn add_sofa(scene: &mut VectorScene, origin: Point) {
    let (width, depth) = (7.0, 2.5);
    let backrest = 0.5;
    let arm = 0.3;
    let (x, y) = (origin.x, origin.y);
    scene.add_rect(Layer::Furniture, Rect::new(x, y, width, depth));
    scene.add_rect(
        Layer::Furniture,
        Rect::new(x, y + depth - backrest, width, backrest),
    );
    scene.add_rect(Layer::Furniture, Rect::new(x, y, arm, depth));
    scene.add_rect(Layer::Furniture, Rect::new(x + width - arm, y, arm, depth));
}

pub fn add_coffee_table(scene: &mut VectorScene, center: Point) {
    let (width, depth) = (3.5, 2.0);
    scene.add_rect(
        Layer::Furniture,
        Rect::new(center.x - width / 2.0, center.y - depth / 2.0, width, depth),
    );
}

/// Cabinet with the screen drawn on its back edge.
pub fn add_tv_unit(scene: &mut VectorScene, origin: Point, width: f64) {
    let depth = 1.5;
    let screen = width * 0.7;
    scene.add_rect(Layer::Furniture, Rect::new(origin.x, origin.y, width, depth));
    scene.add_rect(
        Layer::Furniture,
        Rect::new(origin.x + (width - screen) / 2.0, origin.y + depth, screen, 0.15),
    );
}

/// Table sized by seat count with chairs split along the two long sides.
pub fn add_dining_table(scene: &mut VectorScene, center: Point, seats: usize) {
    let (width, depth) = if seats <= 4 { (4.0, 3.0) } else { (6.0, 3.5) };
    let (half_w, half_d) = (width / 2.0, depth / 2.0);
    scene.add_rect(
        Layer::Furniture,
        Rect::new(center.x - half_w, center.y - half_d, width, depth),
    );

    let chair = 1.2;
    let gap = 0.3;
    let per_side = seats / 2;
    for i in 0..per_side {
        let cx = center.x - half_w + (i as f64 + 0.5) * (width / per_side as f64);
        add_chair(scene, Point::new(cx, center.y + half_d + gap), chair);
        add_chair(scene, Point::new(cx, center.y - half_d - gap - chair), chair);
    }
    // odd seat goes at the head, east end
    if seats % 2 == 1 {
        add_chair(
            scene,
            Point::new(center.x + half_w + gap + chair / 2.0, center.y - chair / 2.0),
            chair,
        );
    }
}

fn add_chair(scene: &mut VectorScene, base: Point, size: f64) {
    scene.add_rect(
        Layer::Furniture,
        Rect::new(base.x - size / 2.0, base.y, size, size),
    );
}

/// Bed centred on the north wall, wardrobe in the south-west corner when
/// the room is wider than ten feet.
pub fn furnish_bedroom(scene: &mut VectorScene, rect: Rect, size: BedSize) {
    let bed_x = rect.x + (rect.width - size.width()) / 2.0;
    let bed_y = rect.top() - BED_DEPTH - WALL_OFFSET;
    add_bed(scene, Point::new(bed_x, bed_y), size);
    if rect.width > 10.0 {
        add_wardrobe(
            scene,
            Point::new(rect.x + WALL_OFFSET, rect.y + WALL_OFFSET),
            5.0,
            2.0,
        );
    }
}

pub fn furnish_living(scene: &mut VectorScene, rect: Rect) {
    add_sofa(
        scene,
        Point::new(rect.x + (rect.width - 7.0) / 2.0, rect.top() - 2.5 - WALL_OFFSET),
    );
    let center = rect.center();
    add_coffee_table(scene, center.offset(0.0, -1.0));
    let tv_width = 5.0;
    add_tv_unit(
        scene,
        Point::new(rect.x + (rect.width - tv_width) / 2.0, rect.y + WALL_OFFSET),
        tv_width,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;

    fn rect_of(scene: &VectorScene, index: usize) -> Rect {
        let Primitive::Polyline { points, .. } = &scene.entities()[index].primitive else {
            panic!("expected polyline");
        };
        Rect::new(
            points[0].x,
            points[0].y,
            points[2].x - points[0].x,
            points[2].y - points[0].y,
        )
    }

    #[test]
    fn odd_seat_count_puts_a_chair_at_the_head() {
        let mut scene = VectorScene::new();
        add_dining_table(&mut scene, Point::ORIGIN, 5);
        // table plus two chairs per long side plus the head chair
        assert_eq!(scene.len(), 6);
        let head = rect_of(&scene, 5);
        assert!(head.x > 3.0, "head chair should clear the east end: {head:?}");
        assert!((head.y + head.depth / 2.0).abs() < 1e-9);

        let mut scene = VectorScene::new();
        add_dining_table(&mut scene, Point::ORIGIN, 4);
        assert_eq!(scene.len(), 5);
    }

    #[test]
    fn single_bed_has_one_pillow() {
        let mut scene = VectorScene::new();
        add_bed(&mut scene, Point::ORIGIN, BedSize::Single);
        assert_eq!(scene.len(), 3);
        let mut scene = VectorScene::new();
        add_bed(&mut scene, Point::ORIGIN, BedSize::King);
        assert_eq!(scene.len(), 4);
        assert_eq!(rect_of(&scene, 0).width, 6.0);
    }

    #[test]
    fn narrow_bedrooms_skip_the_wardrobe() {
        let mut scene = VectorScene::new();
        furnish_bedroom(&mut scene, Rect::new(0.0, 0.0, 10.0, 12.0), BedSize::Double);
        assert!(scene.entities().iter().all(|e| !matches!(e.primitive, Primitive::Circle { .. })));

        let mut scene = VectorScene::new();
        furnish_bedroom(&mut scene, Rect::new(0.0, 0.0, 12.0, 12.0), BedSize::Double);
        let bed = rect_of(&scene, 0);
        assert_eq!(bed.x, 3.75);
        assert_eq!(bed.top(), 12.0 - WALL_OFFSET);
        assert_eq!(scene.count_on(Layer::Furniture), 8);
    }

    #[test]
    fn six_seat_table_grows() {
        let mut scene = VectorScene::new();
        add_dining_table(&mut scene, Point::new(5.0, 4.0), 6);
        assert_eq!(scene.len(), 7);
        let table = rect_of(&scene, 0);
        assert_eq!((table.width, table.depth), (6.0, 3.5));
    }
}
