use crate::geom::{Point, Rect};
use crate::ir::{Direction, OpeningKind, OpeningSpec};
use crate::scene::{Layer, VectorScene};

/// Half the spacing between the two glass lines of a window.
const GLASS_OFFSET: f64 = 0.15;

/// Centre of an opening on `wall`, `position` measured from the west or
/// south end of that wall.
pub fn opening_center(rect: Rect, wall: Direction, position: f64) -> Point {
    match wall {
        Direction::South => Point::new(rect.x + rect.width * position, rect.y),
        Direction::North => Point::new(rect.x + rect.width * position, rect.top()),
        Direction::West => Point::new(rect.x, rect.y + rect.depth * position),
        Direction::East => Point::new(rect.right(), rect.y + rect.depth * position),
    }
}

pub fn add_opening(scene: &mut VectorScene, rect: Rect, opening: &OpeningSpec) {
    let center = opening_center(rect, opening.wall, opening.position);
    match opening.kind {
        OpeningKind::Door => add_door(scene, center, opening.wall, opening.width),
        OpeningKind::Window => add_window(scene, center, opening.wall, opening.width),
    }
}

/// Quarter swing of radius `width` into the room plus the open leaf.
pub fn add_door(scene: &mut VectorScene, center: Point, wall: Direction, width: f64) {
    let half = width / 2.0;
    let (pivot, start_angle, leaf) = match wall {
        Direction::South => (center.offset(-half, 0.0), 0.0, (0.0, width)),
        Direction::North => (center.offset(half, 0.0), 180.0, (0.0, -width)),
        Direction::West => (center.offset(0.0, -half), 0.0, (width, 0.0)),
        Direction::East => (center.offset(0.0, half), 180.0, (-width, 0.0)),
    };
    scene.add_arc(Layer::Doors, pivot, width, start_angle, start_angle + 90.0);
    scene.add_line(Layer::Doors, pivot, pivot.offset(leaf.0, leaf.1));
}

/// Two glass lines either side of the wall line, closed at both ends, with
/// a mullion in the middle.
pub fn add_window(scene: &mut VectorScene, center: Point, wall: Direction, width: f64) {
    let half = width / 2.0;
    let horizontal = matches!(wall, Direction::North | Direction::South);
    // (along, across) in wall-local coordinates
    let at = |along: f64, across: f64| {
        if horizontal {
            center.offset(along, across)
        } else {
            center.offset(across, along)
        }
    };
    for across in [-GLASS_OFFSET, GLASS_OFFSET] {
        scene.add_line(Layer::Windows, at(-half, across), at(half, across));
    }
    for along in [-half, 0.0, half] {
        scene.add_line(
            Layer::Windows,
            at(along, -GLASS_OFFSET),
            at(along, GLASS_OFFSET),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;

    #[test]
    fn centre_runs_along_the_wall() {
        let rect = Rect::new(10.0, 20.0, 12.0, 8.0);
        assert_eq!(opening_center(rect, Direction::South, 0.5), Point::new(16.0, 20.0));
        assert_eq!(opening_center(rect, Direction::North, 0.25), Point::new(13.0, 28.0));
        assert_eq!(opening_center(rect, Direction::East, 0.5), Point::new(22.0, 24.0));
        assert_eq!(opening_center(rect, Direction::West, 0.0), Point::new(10.0, 20.0));
    }

    #[test]
    fn doors_swing_into_the_room() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        for wall in Direction::ALL {
            let mut scene = VectorScene::new();
            add_opening(&mut scene, rect, &OpeningSpec::door("r", wall, 3.0));
            let Primitive::Line { end, .. } = scene.entities()[1].primitive else {
                panic!("expected door leaf");
            };
            assert!(rect.x <= end.x && end.x <= rect.right(), "{wall:?}");
            assert!(rect.y <= end.y && end.y <= rect.top(), "{wall:?}");
            let Primitive::Arc { radius, .. } = scene.entities()[0].primitive else {
                panic!("expected swing arc");
            };
            assert_eq!(radius, 3.0);
        }
    }

    #[test]
    fn windows_straddle_the_wall_line() {
        let mut scene = VectorScene::new();
        add_window(&mut scene, Point::new(5.0, 0.0), Direction::South, 4.0);
        assert_eq!(scene.count_on(Layer::Windows), 5);
        let Primitive::Line { start, end } = scene.entities()[0].primitive else {
            panic!("expected glass line");
        };
        assert_eq!(start, Point::new(3.0, -GLASS_OFFSET));
        assert_eq!(end, Point::new(7.0, -GLASS_OFFSET));

        let mut scene = VectorScene::new();
        add_window(&mut scene, Point::new(0.0, 5.0), Direction::West, 2.0);
        let Primitive::Line { start, end } = scene.entities()[1].primitive else {
            panic!("expected glass line");
        };
        assert_eq!(start, Point::new(GLASS_OFFSET, 4.0));
        assert_eq!(end, Point::new(GLASS_OFFSET, 6.0));
    }
}
