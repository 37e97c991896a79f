//! ASCII DXF output in the AutoCAD R12 dialect (`AC1009`).
//!
//! R12 has no ELLIPSE or DIMENSION entity, so ellipses are written as closed
//! polylines and dimensions as their exploded lines and text.

use std::fmt::Write as _;

use crate::geom::Point;
use crate::scene::{Color, DimensionGeometry, Layer, Primitive, TextAlign, VectorScene};

/// Segments used to approximate an ellipse.
pub const ELLIPSE_SEGMENTS: usize = 48;

struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn pair(&mut self, code: u16, value: impl std::fmt::Display) {
        let _ = write!(self.out, "{code:>3}\n{value}\n");
    }

    fn num(&mut self, code: u16, value: f64) {
        // avoid "-0.0000" in the output
        let value = if value.abs() < 5e-5 { 0.0 } else { value };
        self.pair(code, format_args!("{value:.4}"));
    }

    fn point(&mut self, base: u16, point: Point) {
        self.num(base, point.x);
        self.num(base + 10, point.y);
        self.num(base + 20, 0.0);
    }

    fn entity_head(&mut self, kind: &str, layer: Layer, color: Color) {
        self.pair(0, kind);
        self.pair(8, layer.name());
        if let Color::Aci(index) = color {
            self.pair(62, index);
        }
    }

    fn section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }
}

/// Serialises the scene; identical scenes give byte-identical files.
pub fn write_dxf(scene: &VectorScene) -> String {
    let mut dxf = DxfWriter::new();

    dxf.section("HEADER");
    dxf.pair(9, "$ACADVER");
    dxf.pair(1, "AC1009");
    if let Some(bounds) = scene.extents() {
        dxf.pair(9, "$EXTMIN");
        dxf.point(10, Point::new(bounds.min_x, bounds.min_y));
        dxf.pair(9, "$EXTMAX");
        dxf.point(10, Point::new(bounds.max_x, bounds.max_y));
    }
    dxf.end_section();

    dxf.section("TABLES");
    dxf.pair(0, "TABLE");
    dxf.pair(2, "LTYPE");
    dxf.pair(70, 1);
    dxf.pair(0, "LTYPE");
    dxf.pair(2, "CONTINUOUS");
    dxf.pair(70, 0);
    dxf.pair(3, "Solid line");
    dxf.pair(72, 65);
    dxf.pair(73, 0);
    dxf.num(40, 0.0);
    dxf.pair(0, "ENDTAB");

    dxf.pair(0, "TABLE");
    dxf.pair(2, "LAYER");
    dxf.pair(70, Layer::ALL.len());
    for layer in Layer::ALL {
        dxf.pair(0, "LAYER");
        dxf.pair(2, layer.name());
        dxf.pair(70, 0);
        dxf.pair(62, layer.default_aci());
        dxf.pair(6, "CONTINUOUS");
    }
    dxf.pair(0, "ENDTAB");
    dxf.end_section();

    dxf.section("ENTITIES");
    for entity in scene.entities() {
        write_entity(&mut dxf, entity.layer, entity.color, &entity.primitive);
    }
    dxf.end_section();
    dxf.pair(0, "EOF");

    dxf.out
}

fn write_entity(dxf: &mut DxfWriter, layer: Layer, color: Color, primitive: &Primitive) {
    match primitive {
        Primitive::Line { start, end } => {
            dxf.entity_head("LINE", layer, color);
            dxf.point(10, *start);
            dxf.point(11, *end);
        }
        Primitive::Polyline {
            points,
            closed,
            width,
        } => write_polyline(dxf, layer, color, points, *closed, *width),
        Primitive::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            dxf.entity_head("ARC", layer, color);
            dxf.point(10, *center);
            dxf.num(40, *radius);
            dxf.num(50, start_angle.rem_euclid(360.0));
            dxf.num(51, end_angle.rem_euclid(360.0));
        }
        Primitive::Circle { center, radius } => {
            dxf.entity_head("CIRCLE", layer, color);
            dxf.point(10, *center);
            dxf.num(40, *radius);
        }
        Primitive::Ellipse {
            center,
            major_axis,
            ratio,
        } => {
            let points = ellipse_points(*center, *major_axis, *ratio);
            write_polyline(dxf, layer, color, &points, true, 0.0);
        }
        Primitive::Text {
            position,
            height,
            content,
            align,
            rotation,
        } => {
            dxf.entity_head("TEXT", layer, color);
            dxf.point(10, *position);
            dxf.num(40, *height);
            dxf.pair(1, encode_text(content));
            if *rotation != 0.0 {
                dxf.num(50, rotation.rem_euclid(360.0));
            }
            let vertical = match align {
                TextAlign::MiddleCenter => 2,
                TextAlign::BottomCenter => 1,
            };
            dxf.pair(72, 1);
            dxf.point(11, *position);
            dxf.pair(73, vertical);
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
                write_entity(dxf, layer, color, &part);
            }
        }
    }
}

fn write_polyline(
    dxf: &mut DxfWriter,
    layer: Layer,
    color: Color,
    points: &[Point],
    closed: bool,
    width: f64,
) {
    dxf.entity_head("POLYLINE", layer, color);
    dxf.pair(66, 1);
    dxf.point(10, Point::ORIGIN);
    dxf.pair(70, if closed { 1 } else { 0 });
    if width > 0.0 {
        dxf.num(40, width);
        dxf.num(41, width);
    }
    for point in points {
        dxf.pair(0, "VERTEX");
        dxf.pair(8, layer.name());
        dxf.point(10, *point);
    }
    dxf.pair(0, "SEQEND");
    dxf.pair(8, layer.name());
}

fn ellipse_points(center: Point, major_axis: Point, ratio: f64) -> Vec<Point> {
    let minor = Point::new(-major_axis.y * ratio, major_axis.x * ratio);
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
            let (sin, cos) = t.sin_cos();
            center.offset(
                major_axis.x * cos + minor.x * sin,
                major_axis.y * cos + minor.y * sin,
            )
        })
        .collect()
}

/// R12 files are single-byte; other characters use the `\U+XXXX` escape.
fn encode_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for ch in content.chars() {
        match ch {
            '\n' | '\r' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c => {
                let _ = write!(out, "\\U+{:04X}", c as u32);
            }
        }
    }
    out
}
