use crate::geom::{Point, Rect};
use crate::ir::Direction;
use crate::scene::{Color, Layer, VectorScene};

pub const TITLE_BLOCK_WIDTH: f64 = 8.0;
pub const TITLE_BLOCK_HEIGHT: f64 = 4.0;

/// Kite-shaped arrow pointing north, turned counter-clockwise by
/// `rotation` degrees about `position`, with an "N" past its tip.
pub fn add_north_arrow(scene: &mut VectorScene, position: Point, size: f64, rotation: f64) {
    let half_width = size * 0.3;
    let at = |dx: f64, dy: f64| position.offset(dx, dy).rotate_around(position, rotation);
    let tip = at(0.0, size);
    let left = at(-half_width, 0.0);
    let right = at(half_width, 0.0);
    let tail = at(0.0, -size * 0.3);
    scene.add_polyline(Layer::Labels, vec![left, tip, right, tail], true);
    scene.add_text(Layer::Labels, at(0.0, size + 0.3), 0.25, "N");
}

/// Contents of the title block.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock<'a> {
    pub title: &'a str,
    pub plot_width: f64,
    pub plot_depth: f64,
    pub built_up_area: f64,
    pub scale: &'a str,
    pub facing: Direction,
    pub drawing_number: &'a str,
}

/// Double-bordered block split into title, plot information, and a lower
/// band with scale/facing on the left and the drawing number on the right.
pub fn add_title_block(scene: &mut VectorScene, origin: Point, block: &TitleBlock<'_>) {
    let (x, y) = (origin.x, origin.y);
    let (w, h) = (TITLE_BLOCK_WIDTH, TITLE_BLOCK_HEIGHT);
    let outer = Rect::new(x, y, w, h);
    scene.add_rect(Layer::Labels, outer);
    scene.add_rect(Layer::Labels, outer.inset(0.1));

    let upper = y + h * 0.6;
    let lower = y + h * 0.3;
    scene.add_line(Layer::Labels, Point::new(x, upper), Point::new(x + w, upper));
    scene.add_line(Layer::Labels, Point::new(x, lower), Point::new(x + w, lower));
    scene.add_line(Layer::Labels, Point::new(x + w * 0.5, y), Point::new(x + w * 0.5, lower));

    let center_x = x + w / 2.0;
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(250),
        Point::new(center_x, y + h * 0.75),
        0.5,
        block.title,
    );

    let info_y = y + h * 0.45;
    let plot_area = block.plot_width * block.plot_depth;
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(251),
        Point::new(center_x, info_y + 0.2),
        0.25,
        format!(
            "PLOT: {}' x {}' ({plot_area:.0} sq.ft)",
            block.plot_width, block.plot_depth
        ),
    );
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(251),
        Point::new(center_x, info_y - 0.2),
        0.25,
        format!("BUILT-UP: {:.0} sq.ft", block.built_up_area),
    );

    let band_y = y + h * 0.15;
    let left_x = x + w * 0.25;
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(252),
        Point::new(left_x, band_y + 0.15),
        0.2,
        format!("SCALE: {}", block.scale),
    );
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(252),
        Point::new(left_x, band_y - 0.15),
        0.2,
        format!("FACING: {}", block.facing.as_str().to_ascii_uppercase()),
    );
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(252),
        Point::new(x + w * 0.75, band_y),
        0.2,
        format!("DWG: {}", block.drawing_number),
    );
}

/// Wall construction note printed just below the title block.
pub fn add_material_note(scene: &mut VectorScene, title_origin: Point, material: &str) {
    scene.add_colored_text(
        Layer::Labels,
        Color::Aci(252),
        Point::new(title_origin.x + TITLE_BLOCK_WIDTH / 2.0, title_origin.y - 0.5),
        0.2,
        format!("WALLS: {material}"),
    );
}
