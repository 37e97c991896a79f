use crate::config::RenderConfig;
use crate::error::Result;
use crate::geom::{Bounds, Point};
use crate::scene::{DimensionGeometry, Entity, Layer, Primitive, TextAlign, VectorScene};
use crate::text_metrics::text_width;
use crate::theme::Theme;
use std::path::Path;
use tracing::debug;

/// Pen width of a hairline on paper.
const HAIRLINE_INCHES: f64 = 0.008;

/// Maps plan feet (y up) onto SVG pixels (y down).
#[derive(Debug, Clone, Copy)]
struct Viewport {
    min_x: f64,
    max_y: f64,
    scale: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn fit(bounds: &Bounds, pixel_size: f64) -> Self {
        let span = bounds.width().max(bounds.height()).max(1e-6);
        let scale = pixel_size / span;
        Self {
            min_x: bounds.min_x,
            max_y: bounds.max_y,
            scale,
            width: (bounds.width() * scale).ceil().max(1.0),
            height: (bounds.height() * scale).ceil().max(1.0),
        }
    }

    fn map(&self, point: Point) -> (f64, f64) {
        (
            (point.x - self.min_x) * self.scale,
            (self.max_y - point.y) * self.scale,
        )
    }
}

/// Extents of the scene with text measured against the render font.
pub fn scene_bounds(scene: &VectorScene, font_family: &str) -> Option<Bounds> {
    let mut iter = scene.entities().iter();
    let mut bounds = primitive_bounds(&iter.next()?.primitive, font_family);
    for entity in iter {
        bounds.merge(&primitive_bounds(&entity.primitive, font_family));
    }
    Some(bounds)
}

fn primitive_bounds(primitive: &Primitive, font_family: &str) -> Bounds {
    match primitive {
        Primitive::Text {
            position,
            height,
            content,
            align,
            rotation,
        } => {
            let half = text_width(content, *height, font_family) / 2.0;
            let (bottom, top) = match align {
                TextAlign::MiddleCenter => (-height / 2.0, height / 2.0),
                TextAlign::BottomCenter => (0.0, *height),
            };
            let corners = [
                position.offset(-half, bottom),
                position.offset(half, bottom),
                position.offset(half, top),
                position.offset(-half, top),
            ];
            let mut bounds = Bounds::from_point(corners[0].rotate_around(*position, *rotation));
            for corner in &corners[1..] {
                bounds.include(corner.rotate_around(*position, *rotation));
            }
            bounds
        }
        Primitive::Dimension {
            start,
            end,
            offset,
            text,
            text_height,
        } => {
            let geometry = DimensionGeometry::new(*start, *end, *offset);
            let mut bounds = primitive.bounds();
            for part in geometry.explode(*start, *end, text, *text_height) {
                bounds.merge(&primitive_bounds(&part, font_family));
            }
            bounds
        }
        other => other.bounds(),
    }
}

/// Flattens the scene to SVG: extents padded by `config.padding`, longest
/// side scaled to `figure_inches * dpi` pixels, y axis pointing up.
pub fn render_svg(scene: &VectorScene, theme: &Theme, config: &RenderConfig) -> String {
    let bounds = scene_bounds(scene, &config.font_family)
        .unwrap_or_else(|| {
            let mut empty = Bounds::from_point(Point::ORIGIN);
            empty.include(Point::new(1.0, 1.0));
            empty
        })
        .pad(config.padding.max(0.0));
    let view = Viewport::fit(&bounds, config.pixel_size());
    let hairline = (config.dpi as f64 * HAIRLINE_INCHES).max(1.0);
    debug!(
        entities = scene.len(),
        width = view.width,
        height = view.height,
        "rendering svg"
    );

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = view.width,
        h = view.height,
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background(config.background)
    ));

    for layer in Layer::ALL {
        let mut group = String::new();
        for entity in scene.on_layer(layer) {
            let stroke = entity_color(entity, theme, config);
            push_primitive(&mut group, &entity.primitive, &stroke, &view, hairline, config);
        }
        if !group.is_empty() {
            svg.push_str(&format!("<g id=\"{}\">", layer.name()));
            svg.push_str(&group);
            svg.push_str("</g>");
        }
    }

    svg.push_str("</svg>");
    svg
}

fn entity_color(entity: &Entity, theme: &Theme, config: &RenderConfig) -> String {
    if let (Layer::Walls, Primitive::Polyline { width, .. }) = (entity.layer, &entity.primitive) {
        if *width > 0.0 {
            if let Some(color) = &theme.load_bearing_color {
                return color.clone();
            }
        }
    }
    theme.resolve(entity.color, entity.layer, config.background)
}

fn push_primitive(
    svg: &mut String,
    primitive: &Primitive,
    stroke: &str,
    view: &Viewport,
    hairline: f64,
    config: &RenderConfig,
) {
    match primitive {
        Primitive::Line { start, end } => {
            let (x1, y1) = view.map(*start);
            let (x2, y2) = view.map(*end);
            svg.push_str(&format!(
                "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{stroke}\" stroke-width=\"{hairline:.2}\"/>"
            ));
        }
        Primitive::Polyline {
            points,
            closed,
            width,
        } => {
            let tag = if *closed { "polygon" } else { "polyline" };
            let stroke_width = (width * view.scale).max(hairline);
            svg.push_str(&format!(
                "<{tag} points=\"{}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{stroke_width:.2}\" stroke-linejoin=\"miter\"/>",
                points_attr(points, view)
            ));
        }
        Primitive::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            let span = (end_angle - start_angle).rem_euclid(360.0);
            if span == 0.0 {
                push_primitive(
                    svg,
                    &Primitive::Circle {
                        center: *center,
                        radius: *radius,
                    },
                    stroke,
                    view,
                    hairline,
                    config,
                );
                return;
            }
            let on_arc = |degrees: f64| {
                let radians = degrees.to_radians();
                view.map(center.offset(radius * radians.cos(), radius * radians.sin()))
            };
            let (x1, y1) = on_arc(*start_angle);
            let (x2, y2) = on_arc(*end_angle);
            let r = radius * view.scale;
            let large = if span > 180.0 { 1 } else { 0 };
            // counter-clockwise in plan space is counter-clockwise on screen too,
            // which SVG calls sweep 0 once y points down
            svg.push_str(&format!(
                "<path d=\"M {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large} 0 {x2:.2} {y2:.2}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{hairline:.2}\"/>"
            ));
        }
        Primitive::Circle { center, radius } => {
            let (cx, cy) = view.map(*center);
            let r = radius * view.scale;
            svg.push_str(&format!(
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{hairline:.2}\"/>"
            ));
        }
        Primitive::Ellipse {
            center,
            major_axis,
            ratio,
        } => {
            let (cx, cy) = view.map(*center);
            let rx = major_axis.x.hypot(major_axis.y) * view.scale;
            let ry = rx * ratio;
            let angle = -major_axis.y.atan2(major_axis.x).to_degrees();
            svg.push_str(&format!(
                "<ellipse cx=\"{cx:.2}\" cy=\"{cy:.2}\" rx=\"{rx:.2}\" ry=\"{ry:.2}\" transform=\"rotate({angle:.2} {cx:.2} {cy:.2})\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{hairline:.2}\"/>"
            ));
        }
        Primitive::Text {
            position,
            height,
            content,
            align,
            rotation,
        } => {
            let (x, y) = view.map(*position);
            let size = height * view.scale;
            let baseline = match align {
                TextAlign::MiddleCenter => " dominant-baseline=\"central\"",
                TextAlign::BottomCenter => "",
            };
            let transform = if *rotation != 0.0 {
                format!(" transform=\"rotate({:.2} {x:.2} {y:.2})\"", -rotation)
            } else {
                String::new()
            };
            svg.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{size:.2}\" fill=\"{stroke}\" text-anchor=\"middle\"{baseline}{transform}>{}</text>",
                escape_xml(&config.font_family),
                escape_xml(content)
            ));
        }
        Primitive::Dimension {
            start,
            end,
            offset,
            text,
            text_height,
        } => {
            let geometry = DimensionGeometry::new(*start, *end, *offset);
            for part in geometry.explode(*start, *end, text, *text_height) {
                push_primitive(svg, &part, stroke, view, hairline, config);
            }
        }
    }
}

fn points_attr(points: &[Point], view: &Viewport) -> String {
    points
        .iter()
        .map(|point| {
            let (x, y) = view.map(*point);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// PNG bytes of the scene at `config.dpi` on `config.background`.
#[cfg(feature = "png")]
pub fn rasterize(scene: &VectorScene, theme: &Theme, config: &RenderConfig) -> Result<Vec<u8>> {
    let svg = render_svg(scene, theme, config);
    svg_to_png(&svg, config)
}

#[cfg(feature = "png")]
pub fn svg_to_png(svg: &str, config: &RenderConfig) -> Result<Vec<u8>> {
    use crate::error::PlanError;

    let mut opt = usvg::Options::default();
    opt.font_family = primary_family(&config.font_family);
    opt.dpi = config.dpi as f32;
    opt.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|err| PlanError::Rendering(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        PlanError::Rendering(format!(
            "cannot allocate a {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .encode_png()
        .map_err(|err| PlanError::Rendering(err.to_string()))
}

#[cfg(feature = "png")]
fn primary_family(font_family: &str) -> String {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|name| !name.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

/// Writes text output to `output`, or stdout when no path is given.
pub fn write_output_text(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
        }
        None => {
            print!("{}", contents);
        }
    }
    Ok(())
}

pub fn write_output_png(png: &[u8], output: &Path) -> Result<()> {
    std::fs::write(output, png)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Background;
    use crate::geom::Rect;
    use crate::scene::Color;

    fn tight_config() -> RenderConfig {
        RenderConfig {
            dpi: 100,
            figure_inches: 1.0,
            padding: 0.0,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn plan_y_axis_points_up() {
        let mut scene = VectorScene::new();
        scene.add_rect(Layer::Rooms, Rect::new(0.0, 0.0, 10.0, 5.0));
        let svg = render_svg(&scene, &Theme::classic(), &tight_config());
        assert!(svg.contains("width=\"100\" height=\"50\""));
        assert!(svg.contains("points=\"0.00,50.00 100.00,50.00 100.00,0.00 0.00,0.00\""));
        assert!(svg.contains("<g id=\"ROOMS\">"));
    }

    #[test]
    fn background_choice_sets_fill() {
        let mut scene = VectorScene::new();
        scene.add_line(Layer::Rooms, Point::ORIGIN, Point::new(4.0, 4.0));
        let mut config = tight_config();
        config.background = Background::Dark;
        let svg = render_svg(&scene, &Theme::classic(), &config);
        assert!(svg.contains("fill=\"#000000\""));
        // ACI 7 turns white on dark paper
        assert!(svg.contains("stroke=\"#FFFFFF\""));
    }

    #[test]
    fn load_bearing_walls_take_theme_color() {
        let mut scene = VectorScene::new();
        scene.add_wide_polyline(
            Layer::Walls,
            vec![Point::ORIGIN, Point::new(10.0, 0.0)],
            false,
            0.3,
        );
        scene.push(
            Layer::Walls,
            Color::Aci(1),
            Primitive::Line {
                start: Point::new(0.0, 1.0),
                end: Point::new(10.0, 1.0),
            },
        );
        let svg = render_svg(&scene, &Theme::blueprint(), &tight_config());
        assert!(svg.contains("stroke=\"#FF6B6B\""));
        assert!(svg.contains("stroke=\"#FF0000\""));
        let svg = render_svg(&scene, &Theme::classic(), &tight_config());
        assert!(!svg.contains("#FF6B6B"));
    }

    #[test]
    fn arcs_sweep_counter_clockwise() {
        let mut scene = VectorScene::new();
        scene.add_arc(Layer::Doors, Point::ORIGIN, 3.0, 0.0, 90.0);
        let svg = render_svg(&scene, &Theme::classic(), &tight_config());
        assert!(svg.contains(" 0 0 0 "));
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = VectorScene::new();
        scene.add_rect(Layer::Rooms, Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.add_text(Layer::Labels, Point::new(5.0, 5.0), 0.5, "BED & <BATH>");
        let svg = render_svg(&scene, &Theme::classic(), &tight_config());
        assert!(svg.contains("BED &amp; &lt;BATH&gt;"));
    }

    #[test]
    fn dimensions_render_as_lines_and_text() {
        let mut scene = VectorScene::new();
        scene.add_dimension(Point::ORIGIN, Point::new(10.0, 0.0), -2.0, "10'-0\"".into(), 0.5);
        let svg = render_svg(&scene, &Theme::classic(), &tight_config());
        assert_eq!(svg.matches("<line").count(), 5);
        assert!(svg.contains("10&apos;-0&quot;"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut scene = VectorScene::new();
        scene.add_circle(Layer::Fixtures, Point::new(2.0, 2.0), 1.0);
        scene.add_ellipse(Layer::Fixtures, Point::new(5.0, 2.0), Point::new(0.0, 1.0), 0.5);
        let config = RenderConfig::default();
        let theme = Theme::classic();
        assert_eq!(
            render_svg(&scene, &theme, &config),
            render_svg(&scene, &theme, &config)
        );
    }

    #[cfg(feature = "png")]
    #[test]
    fn rasterize_produces_png() {
        let mut scene = VectorScene::new();
        scene.add_rect(Layer::Rooms, Rect::new(0.0, 0.0, 20.0, 10.0));
        let config = RenderConfig {
            dpi: 50,
            figure_inches: 2.0,
            ..RenderConfig::default()
        };
        let png = rasterize(&scene, &Theme::classic(), &config).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
}
