use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::Background;
use crate::dimension::deserialize_feet;
use crate::geom::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "North", alias = "N")]
    North,
    #[serde(alias = "South", alias = "S")]
    South,
    #[serde(alias = "East", alias = "E")]
    East,
    #[serde(alias = "West", alias = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Self::North),
            "south" | "s" => Some(Self::South),
            "east" | "e" => Some(Self::East),
            "west" | "w" => Some(Self::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Counter-clockwise rotation that turns a north-up symbol to face `self`.
    pub fn rotation_degrees(&self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::East => 90.0,
            Direction::South => 180.0,
            Direction::West => 270.0,
        }
    }
}

/// Closed room-type vocabulary; unknown tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomKind {
    Living,
    Dining,
    Kitchen,
    Bedroom,
    MasterBedroom,
    Bathroom,
    AttachedBathroom,
    CommonBathroom,
    Toilet,
    Pooja,
    Staircase,
    Courtyard,
    Verandah,
    Store,
    Utility,
    Parking,
    Balcony,
    Foyer,
    Wash,
    ServantRoom,
    Other(String),
}

impl RoomKind {
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "living" | "livingroom" | "hall" => Self::Living,
            "dining" | "diningroom" => Self::Dining,
            "kitchen" => Self::Kitchen,
            "bedroom" | "doublebedroom" => Self::Bedroom,
            "masterbedroom" => Self::MasterBedroom,
            "bathroom" | "bath" => Self::Bathroom,
            "attachedbathroom" | "attachedbath" => Self::AttachedBathroom,
            "commonbathroom" => Self::CommonBathroom,
            "toilet" | "commontoilet" | "wc" => Self::Toilet,
            "pooja" | "puja" => Self::Pooja,
            "staircase" | "stairs" => Self::Staircase,
            "courtyard" | "mutram" | "centralyard" => Self::Courtyard,
            "verandah" | "veranda" => Self::Verandah,
            "store" | "storeroom" => Self::Store,
            "utility" => Self::Utility,
            "parking" => Self::Parking,
            "balcony" => Self::Balcony,
            "foyer" => Self::Foyer,
            "wash" => Self::Wash,
            "servantroom" => Self::ServantRoom,
            _ => Self::Other(tag.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoomKind::Living => "living",
            RoomKind::Dining => "dining",
            RoomKind::Kitchen => "kitchen",
            RoomKind::Bedroom => "bedroom",
            RoomKind::MasterBedroom => "master-bedroom",
            RoomKind::Bathroom => "bathroom",
            RoomKind::AttachedBathroom => "attached-bathroom",
            RoomKind::CommonBathroom => "common-bathroom",
            RoomKind::Toilet => "toilet",
            RoomKind::Pooja => "pooja",
            RoomKind::Staircase => "staircase",
            RoomKind::Courtyard => "courtyard",
            RoomKind::Verandah => "verandah",
            RoomKind::Store => "store",
            RoomKind::Utility => "utility",
            RoomKind::Parking => "parking",
            RoomKind::Balcony => "balcony",
            RoomKind::Foyer => "foyer",
            RoomKind::Wash => "wash",
            RoomKind::ServantRoom => "servant-room",
            RoomKind::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_bathroom(&self) -> bool {
        matches!(
            self,
            RoomKind::Bathroom
                | RoomKind::AttachedBathroom
                | RoomKind::CommonBathroom
                | RoomKind::Toilet
        )
    }

    pub fn is_bedroom(&self) -> bool {
        matches!(
            self,
            RoomKind::Bedroom | RoomKind::MasterBedroom | RoomKind::ServantRoom
        )
    }

    pub fn is_wet(&self) -> bool {
        self.is_bathroom() || matches!(self, RoomKind::Kitchen)
    }
}

impl From<String> for RoomKind {
    fn from(tag: String) -> Self {
        RoomKind::from_tag(&tag)
    }
}

impl From<RoomKind> for String {
    fn from(kind: RoomKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[default]
    Public,
    Private,
    Service,
    Transition,
    Outdoor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    #[serde(deserialize_with = "deserialize_feet")]
    pub width: f64,
    #[serde(deserialize_with = "deserialize_feet")]
    pub depth: f64,
    /// Declared floor area in sq ft; informational, never re-derived.
    #[serde(alias = "area_sqft")]
    pub area: f64,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub adjacent_to: Vec<String>,
}

impl RoomSpec {
    pub fn new(id: &str, kind: RoomKind, width: f64, depth: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            width,
            depth,
            area: width * depth,
            zone: Zone::default(),
            adjacent_to: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn adjacent(mut self, ids: &[&str]) -> Self {
        self.adjacent_to = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect::at(origin, self.width, self.depth)
    }
}

/// A room with its solved origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRoom {
    #[serde(flatten)]
    pub spec: RoomSpec,
    pub origin: Point,
}

impl PlacedRoom {
    pub fn rect(&self) -> Rect {
        self.spec.rect_at(self.origin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotEnvelope {
    pub width: f64,
    pub depth: f64,
    pub road_side: Direction,
    pub orientation: Direction,
}

impl PlotEnvelope {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            road_side: Direction::South,
            orientation: Direction::North,
        }
    }

    pub fn with_road_side(mut self, side: Direction) -> Self {
        self.road_side = side;
        self
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.depth)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSystem {
    pub external_thickness_inches: f64,
    pub internal_thickness_inches: f64,
    pub material: String,
    pub load_bearing_walls: BTreeSet<String>,
}

impl Default for WallSystem {
    fn default() -> Self {
        Self {
            external_thickness_inches: 9.0,
            internal_thickness_inches: 4.5,
            material: "Burnt clay brick masonry with cement mortar 1:6".to_string(),
            load_bearing_walls: BTreeSet::new(),
        }
    }
}

impl WallSystem {
    pub fn external_feet(&self) -> f64 {
        self.external_thickness_inches / 12.0
    }

    pub fn internal_feet(&self) -> f64 {
        self.internal_thickness_inches / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaircaseKind {
    #[default]
    Straight,
    #[serde(alias = "l_shaped", alias = "l")]
    LShaped,
    #[serde(alias = "u_shaped", alias = "u")]
    UShaped,
    Spiral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaircaseSpec {
    #[serde(rename = "type")]
    pub kind: StaircaseKind,
    pub width_feet: f64,
    pub riser_height_inches: f64,
    #[serde(alias = "tread_width_inches")]
    pub tread_depth_inches: f64,
}

impl Default for StaircaseSpec {
    fn default() -> Self {
        Self {
            kind: StaircaseKind::Straight,
            width_feet: 3.5,
            riser_height_inches: 7.0,
            tread_depth_inches: 10.0,
        }
    }
}

impl StaircaseSpec {
    pub fn new(kind: StaircaseKind, width_feet: f64) -> Self {
        Self {
            kind,
            width_feet,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaftKind {
    Plumbing,
    Ventilation,
}

impl ShaftKind {
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            ShaftKind::Plumbing => (1.5, 1.5),
            ShaftKind::Ventilation => (1.0, 1.0),
        }
    }

    pub fn label_prefix(&self) -> &'static str {
        match self {
            ShaftKind::Plumbing => "P",
            ShaftKind::Ventilation => "V",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShaftSpec {
    pub kind: ShaftKind,
    pub label: String,
    pub size: (f64, f64),
    pub serves_rooms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn default_width(&self) -> f64 {
        match self {
            OpeningKind::Door => 3.0,
            OpeningKind::Window => 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningSpec {
    pub room: String,
    pub kind: OpeningKind,
    pub wall: Direction,
    /// Fraction along the wall, 0 at the west/south end.
    pub position: f64,
    pub width: f64,
}

impl OpeningSpec {
    pub fn door(room: &str, wall: Direction, width: f64) -> Self {
        Self {
            room: room.to_string(),
            kind: OpeningKind::Door,
            wall,
            position: 0.5,
            width,
        }
    }

    pub fn window(room: &str, wall: Direction, width: f64) -> Self {
        Self {
            room: room.to_string(),
            kind: OpeningKind::Window,
            wall,
            position: 0.5,
            width,
        }
    }
}

/// Validated drawing request; built by the parser, consumed by every stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    pub plot: PlotEnvelope,
    pub walls: WallSystem,
    pub rooms: Vec<RoomSpec>,
    pub staircase: Option<StaircaseSpec>,
    pub staircase_position: Option<Point>,
    pub shafts: Vec<ShaftSpec>,
    pub openings: Vec<OpeningSpec>,
    pub background: Option<Background>,
    pub dpi: Option<u32>,
}

impl PlanRequest {
    pub fn new(plot: PlotEnvelope, rooms: Vec<RoomSpec>) -> Self {
        Self {
            plot,
            walls: WallSystem::default(),
            rooms,
            staircase: None,
            staircase_position: None,
            shafts: Vec::new(),
            openings: Vec::new(),
            background: None,
            dpi: None,
        }
    }

    pub fn room(&self, id: &str) -> Option<&RoomSpec> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn total_area(&self) -> f64 {
        self.rooms.iter().map(|room| room.area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_kind_normalises_aliases() {
        assert_eq!(RoomKind::from_tag("Living Room"), RoomKind::Living);
        assert_eq!(RoomKind::from_tag("living-room"), RoomKind::Living);
        assert_eq!(RoomKind::from_tag("veranda"), RoomKind::Verandah);
        assert_eq!(RoomKind::from_tag("mutram"), RoomKind::Courtyard);
        assert_eq!(RoomKind::from_tag("attached_bath"), RoomKind::AttachedBathroom);
        assert_eq!(RoomKind::from_tag("common-toilet"), RoomKind::Toilet);
        assert_eq!(
            RoomKind::from_tag("gym"),
            RoomKind::Other("gym".to_string())
        );
    }

    #[test]
    fn room_kind_round_trips_through_serde() {
        let kind: RoomKind = serde_json::from_str("\"master-bedroom\"").unwrap();
        assert_eq!(kind, RoomKind::MasterBedroom);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"master-bedroom\"");
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::from_token("S"), Some(Direction::South));
        assert_eq!(Direction::from_token("West"), Some(Direction::West));
        assert_eq!(Direction::from_token("up"), None);
        assert_eq!(Direction::East.rotation_degrees(), 90.0);
    }

    #[test]
    fn wall_thickness_in_feet() {
        let walls = WallSystem::default();
        assert!((walls.external_feet() - 0.75).abs() < 1e-9);
        assert!((walls.internal_feet() - 0.375).abs() < 1e-9);
    }
}
