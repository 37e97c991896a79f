use serde::Serialize;

use crate::geom::{Point, Rect};
use crate::ir::{Direction, PlotEnvelope, RoomKind};

/// One cell of the plot's 3x3 directional grid (north is +y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 9] = [
        Quadrant::NorthWest,
        Quadrant::North,
        Quadrant::NorthEast,
        Quadrant::West,
        Quadrant::Center,
        Quadrant::East,
        Quadrant::SouthWest,
        Quadrant::South,
        Quadrant::SouthEast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quadrant::NorthWest => "northwest",
            Quadrant::North => "north",
            Quadrant::NorthEast => "northeast",
            Quadrant::West => "west",
            Quadrant::Center => "center",
            Quadrant::East => "east",
            Quadrant::SouthWest => "southwest",
            Quadrant::South => "south",
            Quadrant::SouthEast => "southeast",
        }
    }

    /// (column, row) with column 0 = west and row 0 = south.
    fn cell(&self) -> (u8, u8) {
        match self {
            Quadrant::SouthWest => (0, 0),
            Quadrant::South => (1, 0),
            Quadrant::SouthEast => (2, 0),
            Quadrant::West => (0, 1),
            Quadrant::Center => (1, 1),
            Quadrant::East => (2, 1),
            Quadrant::NorthWest => (0, 2),
            Quadrant::North => (1, 2),
            Quadrant::NorthEast => (2, 2),
        }
    }

    pub fn bounds(&self, plot: &PlotEnvelope) -> Rect {
        let third_w = plot.width / 3.0;
        let third_d = plot.depth / 3.0;
        let (col, row) = self.cell();
        Rect::new(
            f64::from(col) * third_w,
            f64::from(row) * third_d,
            third_w,
            third_d,
        )
    }

    pub fn containing(plot: &PlotEnvelope, point: Point) -> Quadrant {
        let col = band(point.x, plot.width);
        let row = band(point.y, plot.depth);
        Quadrant::ALL
            .into_iter()
            .find(|quadrant| quadrant.cell() == (col, row))
            .unwrap_or(Quadrant::Center)
    }

    pub fn for_side(side: Direction) -> Quadrant {
        match side {
            Direction::North => Quadrant::North,
            Direction::South => Quadrant::South,
            Direction::East => Quadrant::East,
            Direction::West => Quadrant::West,
        }
    }
}

fn band(value: f64, extent: f64) -> u8 {
    if extent <= 0.0 {
        return 1;
    }
    ((value / extent * 3.0).floor()).clamp(0.0, 2.0) as u8
}

/// Directional zoning preferences, most preferred first.
pub fn preferred_quadrants(kind: &RoomKind) -> &'static [Quadrant] {
    use Quadrant::*;
    match kind {
        RoomKind::Kitchen => &[SouthEast, East],
        RoomKind::MasterBedroom => &[SouthWest, South],
        RoomKind::Bedroom | RoomKind::ServantRoom => &[SouthWest, South, NorthWest, West],
        RoomKind::Pooja => &[NorthEast, North],
        RoomKind::Living | RoomKind::Foyer => &[NorthEast, North, East],
        RoomKind::Dining => &[West, NorthWest],
        RoomKind::Bathroom
        | RoomKind::AttachedBathroom
        | RoomKind::CommonBathroom
        | RoomKind::Toilet
        | RoomKind::Wash => &[NorthWest, West],
        RoomKind::Verandah | RoomKind::Parking => &[South, East],
        RoomKind::Courtyard => &[Center],
        RoomKind::Staircase => &[SouthWest, South, West],
        RoomKind::Store => &[NorthWest, West],
        RoomKind::Utility => &[NorthWest, SouthEast],
        RoomKind::Balcony | RoomKind::Other(_) => &[],
    }
}

pub fn is_preferred(kind: &RoomKind, quadrant: Quadrant) -> bool {
    preferred_quadrants(kind).contains(&quadrant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_of_the_plot() {
        let plot = PlotEnvelope::new(30.0, 60.0);
        assert_eq!(Quadrant::SouthWest.bounds(&plot), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(Quadrant::NorthEast.bounds(&plot), Rect::new(20.0, 40.0, 10.0, 20.0));
        assert_eq!(Quadrant::Center.bounds(&plot), Rect::new(10.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn point_lookup_matches_bounds() {
        let plot = PlotEnvelope::new(30.0, 30.0);
        for quadrant in Quadrant::ALL {
            let center = quadrant.bounds(&plot).center();
            assert_eq!(Quadrant::containing(&plot, center), quadrant);
        }
        assert_eq!(Quadrant::containing(&plot, Point::new(30.0, 30.0)), Quadrant::NorthEast);
    }

    #[test]
    fn preferences() {
        assert_eq!(preferred_quadrants(&RoomKind::Kitchen)[0], Quadrant::SouthEast);
        assert!(is_preferred(&RoomKind::Courtyard, Quadrant::Center));
        assert!(preferred_quadrants(&RoomKind::Other("gym".into())).is_empty());
    }
}
