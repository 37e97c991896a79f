use serde::Serialize;

use crate::geom::{Bounds, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layer {
    Walls,
    Rooms,
    Dimensions,
    Stairs,
    Plumbing,
    Ventilation,
    Doors,
    Windows,
    Labels,
    Furniture,
    Fixtures,
}

impl Layer {
    pub const ALL: [Layer; 11] = [
        Layer::Walls,
        Layer::Rooms,
        Layer::Dimensions,
        Layer::Stairs,
        Layer::Plumbing,
        Layer::Ventilation,
        Layer::Doors,
        Layer::Windows,
        Layer::Labels,
        Layer::Furniture,
        Layer::Fixtures,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Walls => "WALLS",
            Layer::Rooms => "ROOMS",
            Layer::Dimensions => "DIMENSIONS",
            Layer::Stairs => "STAIRS",
            Layer::Plumbing => "PLUMBING",
            Layer::Ventilation => "VENTILATION",
            Layer::Doors => "DOORS",
            Layer::Windows => "WINDOWS",
            Layer::Labels => "LABELS",
            Layer::Furniture => "FURNITURE",
            Layer::Fixtures => "FIXTURES",
        }
    }

    /// AutoCAD color index used when an entity is drawn BYLAYER.
    pub fn default_aci(&self) -> u8 {
        match self {
            Layer::Walls => 1,
            Layer::Rooms => 7,
            Layer::Dimensions => 7,
            Layer::Stairs => 3,
            Layer::Plumbing => 5,
            Layer::Ventilation => 4,
            Layer::Doors => 6,
            Layer::Windows => 4,
            Layer::Labels => 7,
            Layer::Furniture => 30,
            Layer::Fixtures => 140,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Color {
    #[default]
    ByLayer,
    Aci(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    MiddleCenter,
    BottomCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        start: Point,
        end: Point,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        /// Constant drawn width in feet; zero is a hairline.
        width: f64,
    },
    /// Counter-clockwise from `start_angle` to `end_angle`, degrees.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    /// `major_axis` is relative to `center`; `ratio` is minor/major.
    Ellipse {
        center: Point,
        major_axis: Point,
        ratio: f64,
    },
    Text {
        position: Point,
        height: f64,
        content: String,
        align: TextAlign,
        rotation: f64,
    },
    Dimension {
        start: Point,
        end: Point,
        offset: f64,
        text: String,
        text_height: f64,
    },
}

impl Primitive {
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Line { start, end } => {
                let mut bounds = Bounds::from_point(*start);
                bounds.include(*end);
                bounds
            }
            Primitive::Polyline { points, .. } => {
                let mut bounds = Bounds::from_point(points.first().copied().unwrap_or_default());
                for point in points.iter().skip(1) {
                    bounds.include(*point);
                }
                bounds
            }
            Primitive::Arc { center, radius, .. } | Primitive::Circle { center, radius } => {
                let mut bounds = Bounds::from_point(center.offset(-radius, -radius));
                bounds.include(center.offset(*radius, *radius));
                bounds
            }
            Primitive::Ellipse {
                center, major_axis, ..
            } => {
                let reach = major_axis.x.hypot(major_axis.y);
                let mut bounds = Bounds::from_point(center.offset(-reach, -reach));
                bounds.include(center.offset(reach, reach));
                bounds
            }
            Primitive::Text {
                position,
                height,
                content,
                ..
            } => {
                let half = content.chars().count() as f64 * height * 0.3;
                let mut bounds = Bounds::from_point(position.offset(-half, -height / 2.0));
                bounds.include(position.offset(half, *height));
                bounds
            }
            Primitive::Dimension {
                start, end, offset, ..
            } => {
                let geometry = DimensionGeometry::new(*start, *end, *offset);
                let mut bounds = Bounds::from_point(*start);
                bounds.include(*end);
                bounds.include(geometry.line_start);
                bounds.include(geometry.line_end);
                bounds
            }
        }
    }
}

/// Derived lines of a linear dimension: the measured edge is offset along
/// its left-hand normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionGeometry {
    pub line_start: Point,
    pub line_end: Point,
    pub normal: Point,
    pub midpoint: Point,
    /// Direction of the dimension line in degrees.
    pub angle: f64,
}

impl DimensionGeometry {
    pub fn new(start: Point, end: Point, offset: f64) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = dx.hypot(dy);
        let normal = if length > 0.0 {
            Point::new(-dy / length, dx / length)
        } else {
            Point::new(0.0, 1.0)
        };
        let line_start = start.offset(normal.x * offset, normal.y * offset);
        let line_end = end.offset(normal.x * offset, normal.y * offset);
        let midpoint = Point::new(
            (line_start.x + line_end.x) / 2.0,
            (line_start.y + line_end.y) / 2.0,
        );
        Self {
            line_start,
            line_end,
            normal,
            midpoint,
            angle: dy.atan2(dx).to_degrees(),
        }
    }

    /// Plain line/text primitives for targets without native dimensions.
    pub fn explode(&self, start: Point, end: Point, text: &str, text_height: f64) -> Vec<Primitive> {
        let overshoot = text_height * 0.5;
        let extend = |from: Point, to: Point| Primitive::Line {
            start: from,
            end: to.offset(self.normal.x * overshoot * 0.5, self.normal.y * overshoot * 0.5),
        };
        let tick = |at: Point| {
            let half = text_height * 0.4;
            let diagonal = Point::new(half, half).rotate_around(Point::ORIGIN, self.angle);
            Primitive::Line {
                start: at.offset(-diagonal.x, -diagonal.y),
                end: at.offset(diagonal.x, diagonal.y),
            }
        };
        let mut rotation = self.angle;
        if rotation > 90.0 || rotation <= -90.0 {
            rotation -= 180.0f64.copysign(rotation);
        }
        vec![
            extend(start, self.line_start),
            extend(end, self.line_end),
            Primitive::Line {
                start: self.line_start,
                end: self.line_end,
            },
            tick(self.line_start),
            tick(self.line_end),
            Primitive::Text {
                position: self
                    .midpoint
                    .offset(self.normal.x * text_height * 0.3, self.normal.y * text_height * 0.3),
                height: text_height,
                content: text.to_string(),
                align: TextAlign::BottomCenter,
                rotation,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub layer: Layer,
    pub color: Color,
    pub primitive: Primitive,
}

/// Ordered, layered vector drawing. Entities keep insertion order so that
/// identical input always produces identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VectorScene {
    entities: Vec<Entity>,
}

impl VectorScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, color: Color, primitive: Primitive) {
        self.entities.push(Entity {
            layer,
            color,
            primitive,
        });
    }

    pub fn add_line(&mut self, layer: Layer, start: Point, end: Point) {
        self.push(layer, Color::ByLayer, Primitive::Line { start, end });
    }

    pub fn add_polyline(&mut self, layer: Layer, points: Vec<Point>, closed: bool) {
        self.push(
            layer,
            Color::ByLayer,
            Primitive::Polyline {
                points,
                closed,
                width: 0.0,
            },
        );
    }

    pub fn add_wide_polyline(&mut self, layer: Layer, points: Vec<Point>, closed: bool, width: f64) {
        self.push(
            layer,
            Color::ByLayer,
            Primitive::Polyline {
                points,
                closed,
                width,
            },
        );
    }

    pub fn add_rect(&mut self, layer: Layer, rect: Rect) {
        self.add_polyline(layer, rect.corners().to_vec(), true);
    }

    pub fn add_arc(&mut self, layer: Layer, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(
            layer,
            Color::ByLayer,
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            },
        );
    }

    pub fn add_circle(&mut self, layer: Layer, center: Point, radius: f64) {
        self.push(layer, Color::ByLayer, Primitive::Circle { center, radius });
    }

    pub fn add_ellipse(&mut self, layer: Layer, center: Point, major_axis: Point, ratio: f64) {
        self.push(
            layer,
            Color::ByLayer,
            Primitive::Ellipse {
                center,
                major_axis,
                ratio,
            },
        );
    }

    pub fn add_text(&mut self, layer: Layer, position: Point, height: f64, content: impl Into<String>) {
        self.add_colored_text(layer, Color::ByLayer, position, height, content);
    }

    pub fn add_colored_text(
        &mut self,
        layer: Layer,
        color: Color,
        position: Point,
        height: f64,
        content: impl Into<String>,
    ) {
        self.push(
            layer,
            color,
            Primitive::Text {
                position,
                height,
                content: content.into(),
                align: TextAlign::MiddleCenter,
                rotation: 0.0,
            },
        );
    }

    pub fn add_dimension(&mut self, start: Point, end: Point, offset: f64, text: String, text_height: f64) {
        self.push(
            Layer::Dimensions,
            Color::ByLayer,
            Primitive::Dimension {
                start,
                end,
                offset,
                text,
                text_height,
            },
        );
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |entity| entity.layer == layer)
    }

    pub fn count_on(&self, layer: Layer) -> usize {
        self.on_layer(layer).count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().filter_map(|entity| match &entity.primitive {
            Primitive::Text { content, .. } => Some(content.as_str()),
            Primitive::Dimension { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn extents(&self) -> Option<Bounds> {
        let mut iter = self.entities.iter();
        let mut bounds = iter.next()?.primitive.bounds();
        for entity in iter {
            bounds.merge(&entity.primitive.bounds());
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_offsets_to_the_left_of_travel() {
        let geometry = DimensionGeometry::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), -2.0);
        assert!((geometry.line_start.y + 2.0).abs() < 1e-9);
        assert!((geometry.line_end.x - 10.0).abs() < 1e-9);
        assert!(geometry.angle.abs() < 1e-9);
    }

    #[test]
    fn explode_keeps_text_readable() {
        let geometry = DimensionGeometry::new(Point::new(0.0, 10.0), Point::new(0.0, 0.0), 2.0);
        let parts = geometry.explode(Point::new(0.0, 10.0), Point::new(0.0, 0.0), "10'-0\"", 0.5);
        assert_eq!(parts.len(), 6);
        let Primitive::Text { rotation, .. } = &parts[5] else {
            panic!("expected text");
        };
        assert!((*rotation - 90.0).abs() < 1e-9);
    }

    #[test]
    fn extents_cover_all_entities() {
        let mut scene = VectorScene::new();
        scene.add_rect(Layer::Rooms, Rect::new(0.0, 0.0, 10.0, 5.0));
        scene.add_circle(Layer::Fixtures, Point::new(12.0, 2.0), 1.0);
        let bounds = scene.extents().unwrap();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 13.0);
        assert_eq!(bounds.max_y, 5.0);
        assert_eq!(scene.count_on(Layer::Rooms), 1);
    }
}
