use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Background;
use crate::dimension::{deserialize_feet, deserialize_feet_opt};
use crate::error::{PlanError, ReferenceKind, Result};
use crate::geom::Point;
use crate::ir::{
    Direction, OpeningKind, OpeningSpec, PlanRequest, PlotEnvelope, RoomSpec, ShaftKind,
    ShaftSpec, StaircaseSpec, WallSystem,
};

const FEET_PER_METER: f64 = 3.280_84;

#[derive(Debug, Deserialize)]
struct PlanInput {
    rooms: Vec<RoomSpec>,
    #[serde(default, alias = "plot")]
    plot_dimensions: Option<PlotInput>,
    #[serde(default, alias = "walls")]
    wall_system: WallSystem,
    #[serde(default)]
    staircase: Option<StaircaseInput>,
    #[serde(default)]
    staircase_position: Option<(f64, f64)>,
    #[serde(default)]
    shafts: Vec<ShaftInput>,
    #[serde(default)]
    plumbing_shafts: Vec<ShaftInput>,
    #[serde(default)]
    ventilation_shafts: Vec<ShaftInput>,
    #[serde(default)]
    openings: Vec<OpeningInput>,
    #[serde(default)]
    road_side: Option<String>,
    #[serde(default)]
    orientation: Option<String>,
    #[serde(default)]
    background: Option<Background>,
    #[serde(default)]
    dpi: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PlotInput {
    #[serde(deserialize_with = "deserialize_feet")]
    width: f64,
    #[serde(deserialize_with = "deserialize_feet")]
    depth: f64,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    road_side: Option<String>,
    #[serde(default)]
    orientation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StaircaseInput {
    #[serde(flatten)]
    spec: StaircaseSpec,
    #[serde(default)]
    position: Option<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct ShaftInput {
    #[serde(default, alias = "type")]
    kind: Option<ShaftKind>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    size: Option<(f64, f64)>,
    #[serde(default)]
    serves_rooms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OpeningInput {
    room: String,
    #[serde(alias = "type")]
    kind: OpeningKind,
    wall: String,
    #[serde(default = "default_opening_position")]
    position: f64,
    #[serde(default, deserialize_with = "deserialize_feet_opt")]
    width: Option<f64>,
}

fn default_opening_position() -> f64 {
    0.5
}

/// Parses a JSON or JSON5 plan and validates it before layout.
pub fn parse_plan(input: &str) -> Result<PlanRequest> {
    let raw: PlanInput = json5::from_str(input).map_err(|err| PlanError::Parse(err.to_string()))?;
    let request = build_request(raw)?;
    info!(
        rooms = request.rooms.len(),
        plot_width = request.plot.width,
        plot_depth = request.plot.depth,
        "parsed plan"
    );
    Ok(request)
}

fn build_request(raw: PlanInput) -> Result<PlanRequest> {
    if raw.rooms.is_empty() {
        return Err(PlanError::input("plan has no rooms"));
    }
    for room in &raw.rooms {
        validate_room(room)?;
    }
    let mut seen = HashSet::new();
    for room in &raw.rooms {
        if !seen.insert(room.id.as_str()) {
            return Err(PlanError::input(format!("duplicate room id '{}'", room.id)));
        }
    }

    let plot = match &raw.plot_dimensions {
        Some(plot) => {
            let scale = unit_scale(plot.unit.as_deref())?;
            let road_side = direction_or(
                plot.road_side.as_deref().or(raw.road_side.as_deref()),
                Direction::South,
                "road_side",
            )?;
            let orientation = direction_or(
                plot.orientation.as_deref().or(raw.orientation.as_deref()),
                Direction::North,
                "orientation",
            )?;
            PlotEnvelope {
                width: plot.width * scale,
                depth: plot.depth * scale,
                road_side,
                orientation,
            }
        }
        None => {
            let (width, depth) = estimate_plot(&raw.rooms);
            debug!(width, depth, "estimated plot envelope");
            PlotEnvelope {
                width,
                depth,
                road_side: direction_or(raw.road_side.as_deref(), Direction::South, "road_side")?,
                orientation: direction_or(
                    raw.orientation.as_deref(),
                    Direction::North,
                    "orientation",
                )?,
            }
        }
    };
    validate_plot(&plot, &raw.rooms)?;
    validate_walls(&raw.wall_system)?;

    let (staircase, mut staircase_position) = match raw.staircase {
        Some(input) => {
            validate_staircase(&input.spec)?;
            (Some(input.spec), input.position.map(Point::from))
        }
        None => (None, None),
    };
    if let Some(position) = raw.staircase_position {
        staircase_position = Some(Point::from(position));
    }

    let mut shafts = Vec::new();
    let tagged = raw
        .shafts
        .into_iter()
        .map(|shaft| (shaft.kind.unwrap_or(ShaftKind::Plumbing), shaft))
        .chain(
            raw.plumbing_shafts
                .into_iter()
                .map(|shaft| (ShaftKind::Plumbing, shaft)),
        )
        .chain(
            raw.ventilation_shafts
                .into_iter()
                .map(|shaft| (ShaftKind::Ventilation, shaft)),
        );
    let mut counters = [0usize; 2];
    for (kind, shaft) in tagged {
        let counter = &mut counters[kind as usize];
        *counter += 1;
        let size = shaft.size.unwrap_or_else(|| kind.default_size());
        if !(size.0 > 0.0 && size.1 > 0.0 && size.0.is_finite() && size.1.is_finite()) {
            return Err(PlanError::input(format!(
                "shaft size must be positive, got {} x {}",
                size.0, size.1
            )));
        }
        let label = shaft
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| format!("{}{}", kind.label_prefix(), counter));
        shafts.push(ShaftSpec {
            kind,
            label,
            size,
            serves_rooms: shaft.serves_rooms,
        });
    }

    let mut openings = Vec::with_capacity(raw.openings.len());
    for opening in raw.openings {
        let wall = Direction::from_token(&opening.wall).ok_or_else(|| {
            PlanError::input(format!(
                "opening in room '{}' has unknown wall '{}'",
                opening.room, opening.wall
            ))
        })?;
        if !(0.0..=1.0).contains(&opening.position) {
            return Err(PlanError::input(format!(
                "opening position {} in room '{}' is outside [0, 1]",
                opening.position, opening.room
            )));
        }
        let width = opening.width.unwrap_or_else(|| opening.kind.default_width());
        if !(width > 0.0 && width.is_finite()) {
            return Err(PlanError::input(format!(
                "opening width in room '{}' must be positive",
                opening.room
            )));
        }
        openings.push(OpeningSpec {
            room: opening.room,
            kind: opening.kind,
            wall,
            position: opening.position,
            width,
        });
    }

    Ok(PlanRequest {
        plot,
        walls: raw.wall_system,
        rooms: raw.rooms,
        staircase,
        staircase_position,
        shafts,
        openings,
        background: raw.background,
        dpi: raw.dpi,
    })
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_room(room: &RoomSpec) -> Result<()> {
    if room.id.trim().is_empty() {
        return Err(PlanError::input("room id must not be empty"));
    }
    if !positive(room.width) || !positive(room.depth) {
        return Err(PlanError::input(format!(
            "room '{}' must have positive width and depth, got {} x {}",
            room.id, room.width, room.depth
        )));
    }
    if !positive(room.area) {
        return Err(PlanError::input(format!(
            "room '{}' must have a positive area",
            room.id
        )));
    }
    Ok(())
}

fn validate_plot(plot: &PlotEnvelope, rooms: &[RoomSpec]) -> Result<()> {
    if !positive(plot.width) || !positive(plot.depth) {
        return Err(PlanError::input(format!(
            "plot must have positive width and depth, got {} x {}",
            plot.width, plot.depth
        )));
    }
    for room in rooms {
        if room.width > plot.width || room.depth > plot.depth {
            return Err(PlanError::input(format!(
                "room '{}' ({} x {}) does not fit in the {} x {} plot",
                room.id, room.width, room.depth, plot.width, plot.depth
            )));
        }
    }
    let footprint: f64 = rooms.iter().map(|room| room.width * room.depth).sum();
    if footprint > plot.area() {
        return Err(PlanError::input(format!(
            "total room footprint {footprint:.1} sq ft exceeds plot area {:.1} sq ft",
            plot.area()
        )));
    }
    Ok(())
}

fn validate_walls(walls: &WallSystem) -> Result<()> {
    if !positive(walls.external_thickness_inches) || !positive(walls.internal_thickness_inches) {
        return Err(PlanError::input("wall thickness must be positive"));
    }
    Ok(())
}

fn validate_staircase(spec: &StaircaseSpec) -> Result<()> {
    if !positive(spec.width_feet)
        || !positive(spec.riser_height_inches)
        || !positive(spec.tread_depth_inches)
    {
        return Err(PlanError::input(
            "staircase width, riser and tread must be positive",
        ));
    }
    Ok(())
}

fn unit_scale(unit: Option<&str>) -> Result<f64> {
    match unit.map(|unit| unit.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("feet") | Some("foot") | Some("ft") => Ok(1.0),
        Some("meters") | Some("metres") | Some("meter") | Some("m") => Ok(FEET_PER_METER),
        Some(other) => Err(PlanError::input(format!("unsupported plot unit '{other}'"))),
    }
}

fn direction_or(token: Option<&str>, default: Direction, field: &str) -> Result<Direction> {
    match token {
        None => Ok(default),
        Some(token) => Direction::from_token(token)
            .ok_or_else(|| PlanError::input(format!("unknown {field} '{token}'"))),
    }
}

/// Plot big enough for the declared areas when the envelope is omitted.
pub fn estimate_plot(rooms: &[RoomSpec]) -> (f64, f64) {
    let total: f64 = rooms.iter().map(|room| room.area).sum();
    let side = total.sqrt() * 1.5;
    let widest = rooms.iter().map(|room| room.width).fold(0.0, f64::max);
    let deepest = rooms.iter().map(|room| room.depth).fold(0.0, f64::max);
    (side.max(30.0).max(widest), side.max(40.0).max(deepest))
}

impl PlanRequest {
    /// Every reference to a room id that does not exist, in input order.
    pub fn dangling_references(&self) -> Vec<(ReferenceKind, String, String)> {
        let ids: BTreeSet<&str> = self.rooms.iter().map(|room| room.id.as_str()).collect();
        let mut dangling = Vec::new();
        for room in &self.rooms {
            for neighbor in &room.adjacent_to {
                if !ids.contains(neighbor.as_str()) {
                    dangling.push((ReferenceKind::Adjacency, room.id.clone(), neighbor.clone()));
                }
            }
        }
        for opening in &self.openings {
            if !ids.contains(opening.room.as_str()) {
                dangling.push((
                    ReferenceKind::Opening,
                    format!("{:?} on {}", opening.kind, opening.wall.as_str()).to_lowercase(),
                    opening.room.clone(),
                ));
            }
        }
        for shaft in &self.shafts {
            for room in &shaft.serves_rooms {
                if !ids.contains(room.as_str()) {
                    dangling.push((ReferenceKind::Shaft, shaft.label.clone(), room.clone()));
                }
            }
        }
        for wall in &self.walls.load_bearing_walls {
            if let Some(room) = load_bearing_room(wall) {
                if !ids.contains(room) {
                    dangling.push((
                        ReferenceKind::LoadBearingWall,
                        wall.clone(),
                        room.to_string(),
                    ));
                }
            }
        }
        dangling
    }

    /// Fails on the first dangling reference; used in strict mode.
    pub fn check_references(&self) -> Result<()> {
        match self.dangling_references().into_iter().next() {
            Some((kind, owner, room)) => Err(PlanError::DanglingReference { kind, owner, room }),
            None => Ok(()),
        }
    }
}

/// Resolved form of a load-bearing wall id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRef<'a> {
    /// `<side>-external`: the plot edge on that side.
    PlotEdge(Direction),
    /// `<room-id>-<side>`.
    Room(&'a str, Direction),
    Unresolved(&'a str),
}

pub fn wall_ref(wall: &str) -> WallRef<'_> {
    if let Some(side) = wall.strip_suffix("-external").and_then(Direction::from_token) {
        return WallRef::PlotEdge(side);
    }
    match wall.rsplit_once('-') {
        Some((owner, side)) if !owner.is_empty() => match Direction::from_token(side) {
            Some(side) => WallRef::Room(owner, side),
            None => WallRef::Unresolved(wall),
        },
        _ => WallRef::Unresolved(wall),
    }
}

/// Room id part of a `<room-id>-<side>` wall id; `None` for plot edges.
/// Ids that match neither form are returned whole so they surface as
/// dangling references.
pub fn load_bearing_room(wall: &str) -> Option<&str> {
    match wall_ref(wall) {
        WallRef::PlotEdge(_) => None,
        WallRef::Room(owner, _) => Some(owner),
        WallRef::Unresolved(wall) => Some(wall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{RoomKind, StaircaseKind};

    const BASIC: &str = r#"{
        plot_dimensions: { width: 30, depth: 40 },
        road_side: "south",
        rooms: [
            { id: "living", name: "Living", type: "living", width: 15, depth: 12, area_sqft: 180, zone: "public", adjacent_to: ["kitchen", "dining"] },
            { id: "kitchen", name: "Kitchen", type: "kitchen", width: "10'", depth: "8'-0\"", area_sqft: 80, zone: "service", adjacent_to: ["living"] },
        ],
    }"#;

    #[test]
    fn parses_json5_with_text_dimensions() {
        let request = parse_plan(BASIC).unwrap();
        assert_eq!(request.rooms.len(), 2);
        assert_eq!(request.rooms[1].kind, RoomKind::Kitchen);
        assert_eq!(request.rooms[1].width, 10.0);
        assert_eq!(request.rooms[1].depth, 8.0);
        assert_eq!(request.plot.road_side, Direction::South);
        assert!(request.dangling_references().is_empty());
    }

    #[test]
    fn rejects_non_positive_room() {
        let err = parse_plan(
            r#"{ plot: {width: 30, depth: 40}, rooms: [{ id: "a", name: "A", type: "living", width: 0, depth: 10, area: 10 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::Input { .. }));
    }

    #[test]
    fn rejects_duplicate_ids_and_oversized_rooms() {
        let dup = r#"{ plot: {width: 30, depth: 40}, rooms: [
            { id: "a", name: "A", type: "living", width: 5, depth: 5, area: 25 },
            { id: "a", name: "B", type: "kitchen", width: 5, depth: 5, area: 25 }] }"#;
        assert!(parse_plan(dup).unwrap_err().to_string().contains("duplicate"));

        let wide = r#"{ plot: {width: 10, depth: 40}, rooms: [
            { id: "hall", name: "Hall", type: "living", width: 12, depth: 5, area: 60 }] }"#;
        assert!(matches!(parse_plan(wide), Err(PlanError::Input { .. })));
    }

    #[test]
    fn rejects_footprint_beyond_plot_area() {
        let crowded = r#"{ plot: {width: 10, depth: 10}, rooms: [
            { id: "a", name: "A", type: "bedroom", width: 10, depth: 6, area: 60 },
            { id: "b", name: "B", type: "bedroom", width: 10, depth: 6, area: 60 }] }"#;
        let err = parse_plan(crowded).unwrap_err();
        assert!(err.to_string().contains("footprint"));
    }

    #[test]
    fn estimates_missing_plot() {
        let request = parse_plan(
            r#"{ rooms: [{ id: "a", name: "A", type: "living", width: 10, depth: 10, area: 100 }] }"#,
        )
        .unwrap();
        assert_eq!(request.plot.width, 30.0);
        assert_eq!(request.plot.depth, 40.0);
    }

    #[test]
    fn shafts_get_default_labels_and_sizes() {
        let request = parse_plan(
            r#"{ plot: {width: 30, depth: 40},
                 rooms: [{ id: "k", name: "K", type: "kitchen", width: 10, depth: 8, area: 80 }],
                 plumbing_shafts: [{ serves_rooms: ["k"] }, { label: "PX" }],
                 ventilation_shafts: [{ serves_rooms: ["ghost"] }] }"#,
        )
        .unwrap();
        let labels: Vec<&str> = request.shafts.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["P1", "PX", "V1"]);
        assert_eq!(request.shafts[2].size, (1.0, 1.0));
        let dangling = request.dangling_references();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].0, ReferenceKind::Shaft);
        assert!(matches!(
            request.check_references(),
            Err(PlanError::DanglingReference { .. })
        ));
    }

    #[test]
    fn staircase_and_openings() {
        let request = parse_plan(
            r#"{ plot: {width: 30, depth: 40},
                 rooms: [{ id: "l", name: "L", type: "living", width: 10, depth: 8, area: 80 }],
                 staircase: { type: "l-shaped", width_feet: 3.5, riser_height_inches: 7, tread_width_inches: 12, position: [2, 3] },
                 openings: [{ room: "l", kind: "window", wall: "E", position: 0.25 }] }"#,
        )
        .unwrap();
        let stair = request.staircase.as_ref().unwrap();
        assert_eq!(stair.kind, StaircaseKind::LShaped);
        assert_eq!(stair.tread_depth_inches, 12.0);
        assert_eq!(request.staircase_position, Some(Point::new(2.0, 3.0)));
        assert_eq!(request.openings[0].wall, Direction::East);
        assert_eq!(request.openings[0].width, 4.0);

        let bad = r#"{ plot: {width: 30, depth: 40},
                 rooms: [{ id: "l", name: "L", type: "living", width: 10, depth: 8, area: 80 }],
                 openings: [{ room: "l", kind: "door", wall: "south", position: 1.5 }] }"#;
        assert!(matches!(parse_plan(bad), Err(PlanError::Input { .. })));
    }

    #[test]
    fn load_bearing_ids() {
        assert_eq!(load_bearing_room("north-external"), None);
        assert_eq!(load_bearing_room("spine"), Some("spine"));
        assert_eq!(load_bearing_room("living-east"), Some("living"));
        assert_eq!(load_bearing_room("master-bed-north"), Some("master-bed"));
    }
}
