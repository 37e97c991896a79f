use crate::geom::{Point, Rect};
use crate::ir::ShaftKind;
use crate::scene::{Color, Layer, Primitive, TextAlign, VectorScene};

/// Shaft symbol centred on `center`: plumbing is a crossed square,
/// ventilation a square with an inscribed circle. The label sits above.
pub fn add_shaft(
    scene: &mut VectorScene,
    kind: ShaftKind,
    center: Point,
    size: (f64, f64),
    label: &str,
) {
    let (width, height) = size;
    let rect = Rect::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
    );
    let (layer, label_height) = match kind {
        ShaftKind::Plumbing => (Layer::Plumbing, 0.2),
        ShaftKind::Ventilation => (Layer::Ventilation, 0.15),
    };
    scene.add_rect(layer, rect);
    match kind {
        ShaftKind::Plumbing => {
            let [a, b, c, d] = rect.corners();
            scene.add_line(layer, a, c);
            scene.add_line(layer, b, d);
        }
        ShaftKind::Ventilation => {
            scene.add_circle(layer, center, width.min(height) / 3.0);
        }
    }
    scene.push(
        layer,
        Color::ByLayer,
        Primitive::Text {
            position: Point::new(center.x, rect.top() + 0.2),
            height: label_height,
            content: label.to_string(),
            align: TextAlign::BottomCenter,
            rotation: 0.0,
        },
    );
}
