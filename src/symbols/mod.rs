//! Deterministic symbol catalogue: furniture and fixtures by room kind,
//! openings, staircases, shafts and sheet annotations.

mod annotations;
mod fixtures;
mod furniture;
mod openings;
mod shafts;
mod staircase;

pub use annotations::{
    TITLE_BLOCK_HEIGHT, TITLE_BLOCK_WIDTH, TitleBlock, add_material_note, add_north_arrow,
    add_title_block,
};
pub use furniture::BedSize;
pub use openings::{add_door, add_opening, add_window, opening_center};
pub use shafts::add_shaft;
pub use staircase::{StairGeometry, add_staircase, run_length, step_count};

use crate::geom::Rect;
use crate::ir::RoomKind;
use crate::scene::VectorScene;

/// Clearance kept between wall faces and furniture, in feet.
pub(crate) const WALL_OFFSET: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureOptions {
    pub stove_burners: usize,
    pub dining_seats: usize,
}

impl Default for FurnitureOptions {
    fn default() -> Self {
        Self {
            stove_burners: 4,
            dining_seats: 4,
        }
    }
}

/// Furniture and fixtures for one room. Returns `false` when the kind has
/// no symbol set.
pub fn furnish_room(
    scene: &mut VectorScene,
    kind: &RoomKind,
    rect: Rect,
    options: &FurnitureOptions,
) -> bool {
    match kind {
        RoomKind::Bedroom => furniture::furnish_bedroom(scene, rect, BedSize::Double),
        RoomKind::MasterBedroom => furniture::furnish_bedroom(scene, rect, BedSize::King),
        RoomKind::ServantRoom => furniture::furnish_bedroom(scene, rect, BedSize::Single),
        RoomKind::Living => furniture::furnish_living(scene, rect),
        RoomKind::Dining => {
            furniture::add_dining_table(scene, rect.center(), options.dining_seats)
        }
        RoomKind::Kitchen => fixtures::furnish_kitchen(scene, rect, options.stove_burners),
        RoomKind::Bathroom
        | RoomKind::AttachedBathroom
        | RoomKind::CommonBathroom
        | RoomKind::Toilet => fixtures::furnish_bathroom(scene, rect),
        RoomKind::Courtyard => fixtures::furnish_courtyard(scene, rect),
        RoomKind::Pooja
        | RoomKind::Staircase
        | RoomKind::Verandah
        | RoomKind::Store
        | RoomKind::Utility
        | RoomKind::Parking
        | RoomKind::Balcony
        | RoomKind::Foyer
        | RoomKind::Wash => return false,
        RoomKind::Other(_) => return false,
    }
    true
}
