//! Turns a solved layout into a layered [`VectorScene`]: walls and labels per
//! room, openings, furniture, staircase, shafts and sheet annotations.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::dimension::{add_overall_dimensions, format_feet_inches};
use crate::error::{Diagnostic, Diagnostics, ReferenceKind};
use crate::geom::{Point, Rect};
use crate::ir::{
    Direction, OpeningSpec, PlanRequest, PlotEnvelope, RoomKind, RoomSpec, ShaftKind, ShaftSpec,
    Zone,
};
use crate::layout::{PlanLayout, Quadrant};
use crate::parser::{WallRef, wall_ref};
use crate::scene::{Color, Layer, Primitive, VectorScene};
use crate::symbols::{
    FurnitureOptions, TitleBlock, add_material_note, add_north_arrow, add_opening, add_shaft,
    add_staircase, add_title_block, furnish_room,
};

/// A wall counts as external when it lies this close to the plot edge.
pub const EXTERNAL_TOLERANCE: f64 = 0.5;
const MIN_LABEL_HEIGHT: f64 = 0.5;
const MAX_LABEL_HEIGHT: f64 = 1.2;
/// Drawn width of a load-bearing emphasis line, in feet.
const LOAD_BEARING_WIDTH: f64 = 0.3;
const NORTH_ARROW_SIZE: f64 = 1.5;
const SHAFT_CLEARANCE: f64 = 0.5;

/// Which walls of `rect` sit on the plot boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExternalWalls {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ExternalWalls {
    pub fn of(rect: &Rect, plot: &PlotEnvelope) -> Self {
        Self {
            north: rect.top() >= plot.depth - EXTERNAL_TOLERANCE,
            south: rect.y <= EXTERNAL_TOLERANCE,
            east: rect.right() >= plot.width - EXTERNAL_TOLERANCE,
            west: rect.x <= EXTERNAL_TOLERANCE,
        }
    }

    pub fn is(&self, wall: Direction) -> bool {
        match wall {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn any(&self) -> bool {
        self.north || self.south || self.east || self.west
    }

    /// First external wall in `order`.
    pub fn first_of(&self, order: &[Direction]) -> Option<Direction> {
        order.iter().copied().find(|wall| self.is(*wall))
    }
}

/// Label height for a room, proportional to its smaller side.
pub fn label_height(width: f64, depth: f64) -> f64 {
    (width.min(depth) / 8.0).clamp(MIN_LABEL_HEIGHT, MAX_LABEL_HEIGHT)
}

/// The wall segment of `rect` on `side`, in drawing order.
fn wall_segment(rect: &Rect, side: Direction) -> [Point; 2] {
    let [sw, se, ne, nw] = rect.corners();
    match side {
        Direction::North => [nw, ne],
        Direction::South => [sw, se],
        Direction::East => [se, ne],
        Direction::West => [sw, nw],
    }
}

/// Openings a room gets from its kind and external walls alone.
pub fn auto_openings(room: &RoomSpec, external: ExternalWalls) -> Vec<OpeningSpec> {
    use Direction::{East, North, South, West};

    let id = room.id.as_str();
    let mut openings = Vec::new();
    match &room.kind {
        RoomKind::Living => {
            if external.south {
                openings.push(OpeningSpec::door(id, South, 3.5));
            }
            for wall in [North, East, West] {
                if external.is(wall) {
                    openings.push(OpeningSpec::window(id, wall, 4.0));
                }
            }
        }
        kind if kind.is_bedroom() => {
            // away from the outside wall
            let door = if external.south && !external.north {
                North
            } else {
                South
            };
            openings.push(OpeningSpec::door(id, door, 3.0));
            for wall in [South, North, East, West] {
                if external.is(wall) {
                    openings.push(OpeningSpec::window(id, wall, 4.0));
                }
            }
        }
        RoomKind::Dining => {
            for wall in [South, North, East, West] {
                if external.is(wall) {
                    openings.push(OpeningSpec::window(id, wall, 4.0));
                }
            }
        }
        RoomKind::Kitchen | RoomKind::Utility => {
            if room.kind == RoomKind::Kitchen {
                openings.push(OpeningSpec::door(id, West, 3.0));
            }
            if let Some(wall) = external.first_of(&[East, West, North]) {
                openings.push(OpeningSpec::window(id, wall, 3.0));
            }
        }
        kind if kind.is_bathroom() => {
            openings.push(OpeningSpec::door(id, South, 2.5));
            if let Some(wall) = external.first_of(&[North, East, West]) {
                openings.push(OpeningSpec::window(id, wall, 2.0));
            }
        }
        _ => {}
    }
    openings
}

/// Scene under construction plus the absolute rectangle of every placed
/// room, which all later symbol placement reads from.
pub struct PlanDrawing<'a> {
    request: &'a PlanRequest,
    config: &'a LayoutConfig,
    scene: VectorScene,
    diagnostics: Diagnostics,
    rooms: BTreeMap<&'a str, Rect>,
}

impl<'a> PlanDrawing<'a> {
    pub fn new(request: &'a PlanRequest, config: &'a LayoutConfig) -> Self {
        Self {
            request,
            config,
            scene: VectorScene::new(),
            diagnostics: Diagnostics::new(),
            rooms: BTreeMap::new(),
        }
    }

    pub fn room_rect(&self, id: &str) -> Option<Rect> {
        self.rooms.get(id).copied()
    }

    fn first_placed(&self, matches: impl Fn(&RoomSpec) -> bool) -> Option<Rect> {
        self.request
            .rooms
            .iter()
            .filter(|room| matches(room))
            .find_map(|room| self.room_rect(&room.id))
    }

    fn dangling(&mut self, reference: ReferenceKind, owner: &str, room: &str) {
        self.diagnostics.push(Diagnostic::DanglingReference {
            reference,
            owner: owner.to_string(),
            room: room.to_string(),
        });
    }

    pub fn add_plot_boundary(&mut self) {
        self.scene.add_rect(Layer::Rooms, self.request.plot.rect());
    }

    /// Outer and inner wall faces plus the name, area and size labels.
    pub fn add_room_with_walls(&mut self, room: &'a RoomSpec, origin: Point) {
        let rect = room.rect_at(origin);
        let external = ExternalWalls::of(&rect, &self.request.plot).any();
        let walls = &self.request.walls;
        let thickness = if external {
            walls.external_feet()
        } else {
            walls.internal_feet()
        };

        let outer_color = if external { Color::Aci(1) } else { Color::Aci(7) };
        self.scene.push(
            Layer::Walls,
            outer_color,
            Primitive::Polyline {
                points: rect.corners().to_vec(),
                closed: true,
                width: 0.0,
            },
        );
        self.scene.add_rect(Layer::Walls, rect.inset(thickness));

        let height = label_height(room.width, room.depth);
        let center = rect.center();
        self.scene.add_colored_text(
            Layer::Labels,
            Color::Aci(250),
            center.offset(0.0, height * 0.5),
            height,
            room.name.clone(),
        );
        self.scene.add_colored_text(
            Layer::Labels,
            Color::Aci(251),
            center.offset(0.0, -height * 0.3),
            height * 0.7,
            format!("{:.0} sq.ft", room.area),
        );
        self.scene.add_colored_text(
            Layer::Labels,
            Color::Aci(252),
            center.offset(0.0, -height),
            height * 0.5,
            format!(
                "{} x {}",
                format_feet_inches(room.width),
                format_feet_inches(room.depth)
            ),
        );
        debug!(room = %room.id, external, thickness, "room walls emitted");
        self.rooms.insert(room.id.as_str(), rect);
    }

    pub fn add_furniture(&mut self) {
        let options = FurnitureOptions {
            stove_burners: self.config.stove_burners,
            dining_seats: self.config.dining_seats,
        };
        for room in &self.request.rooms {
            let Some(rect) = self.room_rect(&room.id) else {
                continue;
            };
            if !furnish_room(&mut self.scene, &room.kind, rect, &options) {
                debug!(room = %room.id, kind = room.kind.as_str(), "no furniture for room kind");
            }
        }
    }

    pub fn add_auto_openings(&mut self) {
        let plot = self.request.plot;
        for room in &self.request.rooms {
            let Some(rect) = self.room_rect(&room.id) else {
                continue;
            };
            for opening in auto_openings(room, ExternalWalls::of(&rect, &plot)) {
                add_opening(&mut self.scene, rect, &opening);
            }
        }
    }

    pub fn add_requested_openings(&mut self) {
        let request = self.request;
        for opening in &request.openings {
            match self.room_rect(&opening.room) {
                Some(rect) => add_opening(&mut self.scene, rect, opening),
                None => {
                    let owner = format!("{:?} on {}", opening.kind, opening.wall.as_str())
                        .to_lowercase();
                    self.dangling(ReferenceKind::Opening, &owner, &opening.room);
                }
            }
        }
    }

    /// Wide polyline over each load-bearing wall.
    pub fn add_load_bearing_walls(&mut self) {
        let request = self.request;
        for wall in &request.walls.load_bearing_walls {
            let segment = match wall_ref(wall) {
                WallRef::PlotEdge(side) => wall_segment(&request.plot.rect(), side),
                WallRef::Room(owner, side) => match self.room_rect(owner) {
                    Some(rect) => wall_segment(&rect, side),
                    None => {
                        self.dangling(ReferenceKind::LoadBearingWall, wall, owner);
                        continue;
                    }
                },
                WallRef::Unresolved(id) => {
                    self.dangling(ReferenceKind::LoadBearingWall, wall, id);
                    continue;
                }
            };
            self.scene
                .add_wide_polyline(Layer::Walls, segment.to_vec(), false, LOAD_BEARING_WIDTH);
        }
    }

    /// Explicit position, else a staircase room, else beside the living
    /// room, else the south-west quadrant.
    pub fn staircase_origin(&self) -> Point {
        if let Some(position) = self.request.staircase_position {
            return position;
        }
        if let Some(rect) = self.first_placed(|room| room.kind == RoomKind::Staircase) {
            return rect.origin();
        }
        if let Some(rect) =
            self.first_placed(|room| room.kind == RoomKind::Living || room.zone == Zone::Public)
        {
            return Point::new((rect.x - 4.0).max(0.0), rect.y);
        }
        Quadrant::SouthWest.bounds(&self.request.plot).origin()
    }

    pub fn add_staircase(&mut self) {
        let Some(spec) = &self.request.staircase else {
            return;
        };
        let origin = self.staircase_origin();
        add_staircase(
            &mut self.scene,
            spec,
            origin,
            self.config.floor_height_inches,
        );
    }

    /// Where a shaft's centre goes, or `None` when it serves nothing placeable.
    fn shaft_center(&mut self, shaft: &ShaftSpec) -> Option<Point> {
        let request = self.request;
        for room in &shaft.serves_rooms {
            if self.room_rect(room).is_none() {
                self.dangling(ReferenceKind::Shaft, &shaft.label, room);
            }
        }
        let served = shaft
            .serves_rooms
            .iter()
            .find_map(|room| self.room_rect(room));
        let rect = match (served, shaft.kind) {
            (Some(rect), _) => rect,
            (None, ShaftKind::Plumbing) if shaft.serves_rooms.is_empty() => request
                .rooms
                .iter()
                .filter(|room| room.kind.is_wet())
                .find_map(|room| self.room_rect(&room.id))?,
            _ => return None,
        };
        Some(match shaft.kind {
            ShaftKind::Plumbing => Point::new(rect.right() + SHAFT_CLEARANCE, rect.y + rect.depth / 2.0),
            ShaftKind::Ventilation => {
                Point::new(rect.x + rect.width / 2.0, rect.top() + SHAFT_CLEARANCE)
            }
        })
    }

    pub fn add_shafts(&mut self) {
        let request = self.request;
        for shaft in &request.shafts {
            match self.shaft_center(shaft) {
                Some(center) => add_shaft(&mut self.scene, shaft.kind, center, shaft.size, &shaft.label),
                None => debug!(shaft = %shaft.label, "shaft has no room to attach to"),
            }
        }
    }

    /// Overall dimensions, north arrow, title block and wall material note.
    pub fn add_annotations(&mut self) {
        let plot = self.request.plot;
        add_overall_dimensions(
            &mut self.scene,
            plot.width,
            plot.depth,
            self.config.overall_dimension_margin,
            self.config.dimension_offset,
        );
        add_north_arrow(
            &mut self.scene,
            Point::new(plot.width + 3.0, plot.depth - 2.0),
            NORTH_ARROW_SIZE,
            plot.orientation.rotation_degrees(),
        );
        let origin = Point::new(plot.width + 2.0, -6.0);
        let block = TitleBlock {
            title: &self.config.title,
            plot_width: plot.width,
            plot_depth: plot.depth,
            built_up_area: self.request.total_area(),
            scale: &self.config.scale_label,
            facing: plot.orientation,
            drawing_number: &self.config.drawing_number,
        };
        add_title_block(&mut self.scene, origin, &block);
        add_material_note(&mut self.scene, origin, &self.request.walls.material);
    }

    pub fn finish(self) -> (VectorScene, Diagnostics) {
        (self.scene, self.diagnostics)
    }
}

/// Geometry emitter entry point.
pub fn build_scene(
    request: &PlanRequest,
    layout: &PlanLayout,
    config: &LayoutConfig,
) -> (VectorScene, Diagnostics) {
    let mut drawing = PlanDrawing::new(request, config);
    drawing.add_plot_boundary();
    for room in &request.rooms {
        if let Some(origin) = layout.origin(&room.id) {
            drawing.add_room_with_walls(room, origin);
        }
    }
    if config.auto_openings {
        drawing.add_auto_openings();
    }
    drawing.add_requested_openings();
    if config.furniture {
        drawing.add_furniture();
    }
    drawing.add_load_bearing_walls();
    drawing.add_staircase();
    drawing.add_shafts();
    drawing.add_annotations();

    let (scene, diagnostics) = drawing.finish();
    info!(
        primitives = scene.len(),
        diagnostics = diagnostics.len(),
        "scene built"
    );
    (scene, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{OpeningKind, StaircaseKind, StaircaseSpec};
    use crate::layout::compute_layout;

    fn standard() -> PlanRequest {
        PlanRequest::new(
            PlotEnvelope::new(30.0, 40.0),
            vec![
                RoomSpec::new("living", RoomKind::Living, 15.0, 12.0)
                    .with_name("Living")
                    .adjacent(&["kitchen", "dining"]),
                RoomSpec::new("kitchen", RoomKind::Kitchen, 10.0, 8.0).adjacent(&["living"]),
                RoomSpec::new("dining", RoomKind::Dining, 10.0, 8.0)
                    .adjacent(&["living", "kitchen"]),
            ],
        )
    }

    fn scene_for(request: &PlanRequest) -> (VectorScene, Diagnostics) {
        let config = LayoutConfig::default();
        let layout = compute_layout(request, &config);
        build_scene(request, &layout, &config)
    }

    #[test]
    fn label_height_is_clamped() {
        assert_eq!(label_height(2.0, 2.0), MIN_LABEL_HEIGHT);
        assert_eq!(label_height(40.0, 30.0), MAX_LABEL_HEIGHT);
        assert_eq!(label_height(8.0, 12.0), 1.0);
    }

    #[test]
    fn external_walls_use_half_foot_slack() {
        let plot = PlotEnvelope::new(30.0, 40.0);
        let walls = ExternalWalls::of(&Rect::new(0.4, 12.0, 29.2, 10.0), &plot);
        assert!(walls.west && walls.east);
        assert!(!walls.north && !walls.south);
        let inner = ExternalWalls::of(&Rect::new(5.0, 5.0, 10.0, 10.0), &plot);
        assert!(!inner.any());
    }

    #[test]
    fn every_room_gets_walls_and_labels() {
        let (scene, diagnostics) = scene_for(&standard());
        assert!(diagnostics.is_empty());
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"Living"));
        assert!(texts.contains(&"180 sq.ft"));
        assert!(texts.contains(&"15'-0\" x 12'-0\""));
        // two faces per room plus nothing else on the wall layer
        assert_eq!(scene.count_on(Layer::Walls), 6);
        assert_eq!(scene.count_on(Layer::Rooms), 1);
    }

    #[test]
    fn living_on_the_road_gets_an_entry_door() {
        let room = RoomSpec::new("living", RoomKind::Living, 15.0, 12.0);
        let external = ExternalWalls {
            south: true,
            west: true,
            ..Default::default()
        };
        let openings = auto_openings(&room, external);
        assert_eq!(openings[0].kind, OpeningKind::Door);
        assert_eq!(openings[0].wall, Direction::South);
        assert_eq!(openings[0].width, 3.5);
        assert_eq!(openings.len(), 2);
        assert_eq!(openings[1].wall, Direction::West);
    }

    #[test]
    fn bedroom_door_faces_inward() {
        let room = RoomSpec::new("bed", RoomKind::MasterBedroom, 12.0, 12.0);
        let north = ExternalWalls {
            north: true,
            ..Default::default()
        };
        assert_eq!(auto_openings(&room, north)[0].wall, Direction::South);
        let south = ExternalWalls {
            south: true,
            ..Default::default()
        };
        assert_eq!(auto_openings(&room, south)[0].wall, Direction::North);
        assert_eq!(auto_openings(&room, ExternalWalls::default()).len(), 1);
    }

    #[test]
    fn service_windows_take_the_first_external_wall() {
        let kitchen = RoomSpec::new("k", RoomKind::Kitchen, 10.0, 8.0);
        let walls = ExternalWalls {
            north: true,
            west: true,
            ..Default::default()
        };
        let openings = auto_openings(&kitchen, walls);
        assert_eq!(openings.len(), 2);
        assert_eq!(openings[1].wall, Direction::West);

        let bath = RoomSpec::new("b", RoomKind::Toilet, 5.0, 6.0);
        let openings = auto_openings(&bath, walls);
        assert_eq!(openings[1].wall, Direction::North);
        assert_eq!(openings[1].width, 2.0);
        assert!(auto_openings(&RoomSpec::new("s", RoomKind::Store, 4.0, 4.0), walls).is_empty());
    }

    #[test]
    fn dangling_symbol_references_become_diagnostics() {
        let mut request = standard();
        request.openings.push(OpeningSpec::door("ghost", Direction::East, 3.0));
        request.shafts.push(ShaftSpec {
            kind: ShaftKind::Ventilation,
            label: "V1".into(),
            size: (1.0, 1.0),
            serves_rooms: vec!["attic".into()],
        });
        request.walls.load_bearing_walls.insert("cellar-north".into());
        request.walls.load_bearing_walls.insert("south-external".into());
        let (scene, diagnostics) = scene_for(&request);
        let rendered: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered.len(), 3, "{rendered:?}");
        assert!(rendered.iter().any(|d| d.contains("ghost")));
        assert!(rendered.iter().any(|d| d.contains("attic")));
        assert!(rendered.iter().any(|d| d.contains("cellar")));
        assert_eq!(scene.count_on(Layer::Ventilation), 0);
        // the plot edge still gets its emphasis line
        assert!(scene.on_layer(Layer::Walls).any(|e| matches!(
            e.primitive,
            Primitive::Polyline { width, .. } if width > 0.0
        )));
    }

    #[test]
    fn plumbing_shaft_attaches_to_first_wet_room() {
        let mut request = standard();
        request.shafts.push(ShaftSpec {
            kind: ShaftKind::Plumbing,
            label: "P1".into(),
            size: (1.5, 1.5),
            serves_rooms: Vec::new(),
        });
        let config = LayoutConfig::default();
        let layout = compute_layout(&request, &config);
        let mut drawing = PlanDrawing::new(&request, &config);
        for room in &request.rooms {
            drawing.add_room_with_walls(room, layout.origin(&room.id).unwrap());
        }
        let kitchen = drawing.room_rect("kitchen").unwrap();
        let center = drawing.shaft_center(&request.shafts[0]).unwrap();
        assert_eq!(center, Point::new(kitchen.right() + 0.5, kitchen.y + 4.0));
    }

    #[test]
    fn staircase_falls_back_beside_living() {
        let mut request = standard();
        request.staircase = Some(StaircaseSpec::new(StaircaseKind::Straight, 3.5));
        let config = LayoutConfig::default();
        let layout = compute_layout(&request, &config);
        let mut drawing = PlanDrawing::new(&request, &config);
        for room in &request.rooms {
            drawing.add_room_with_walls(room, layout.origin(&room.id).unwrap());
        }
        // living sits at the origin, so x clamps to zero
        assert_eq!(drawing.staircase_origin(), Point::ORIGIN);
        request.staircase_position = Some(Point::new(20.0, 30.0));
        let drawing = PlanDrawing::new(&request, &config);
        assert_eq!(drawing.staircase_origin(), Point::new(20.0, 30.0));

        let (scene, _) = scene_for(&request);
        assert!(scene.count_on(Layer::Stairs) > 0);
    }

    #[test]
    fn identical_input_gives_identical_scene() {
        let request = standard();
        assert_eq!(scene_for(&request).0, scene_for(&request).0);
    }
}
