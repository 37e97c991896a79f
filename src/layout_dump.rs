use crate::error::Diagnostic;
use crate::ir::{Direction, PlanRequest};
use crate::layout::{PlanLayout, Quadrant, is_preferred};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub mode: String,
    pub plot: PlotDump,
    pub built_up_area: f64,
    pub coverage: f64,
    pub rooms: Vec<RoomDump>,
    pub diagnostics: Vec<DiagnosticDump>,
}

#[derive(Debug, Serialize)]
pub struct PlotDump {
    pub width: f64,
    pub depth: f64,
    pub road_side: Direction,
    pub orientation: Direction,
}

#[derive(Debug, Serialize)]
pub struct RoomDump {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub quadrant: String,
    /// Whether the room landed in one of its kind's preferred quadrants.
    pub preferred: bool,
    pub adjacent_to: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticDump {
    pub message: String,
    #[serde(flatten)]
    pub detail: Diagnostic,
}

impl LayoutDump {
    pub fn from_layout(layout: &PlanLayout, request: &PlanRequest) -> Self {
        let rooms: Vec<RoomDump> = layout
            .placed_rooms(request)
            .into_iter()
            .map(|placed| {
                let rect = placed.rect();
                let quadrant = Quadrant::containing(&layout.plot, rect.center());
                RoomDump {
                    preferred: is_preferred(&placed.spec.kind, quadrant),
                    quadrant: quadrant.name().to_string(),
                    kind: placed.spec.kind.as_str().to_string(),
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    depth: rect.depth,
                    adjacent_to: placed.spec.adjacent_to.clone(),
                    id: placed.spec.id,
                    name: placed.spec.name,
                }
            })
            .collect();

        let built_up_area: f64 = rooms.iter().map(|room| room.width * room.depth).sum();
        let plot_area = layout.plot.area();
        let coverage = if plot_area > 0.0 {
            built_up_area / plot_area
        } else {
            0.0
        };

        let diagnostics = layout
            .diagnostics
            .iter()
            .map(|diagnostic| DiagnosticDump {
                message: diagnostic.to_string(),
                detail: diagnostic.clone(),
            })
            .collect();

        LayoutDump {
            mode: layout.mode.as_str().to_string(),
            plot: PlotDump {
                width: layout.plot.width,
                depth: layout.plot.depth,
                road_side: layout.plot.road_side,
                orientation: layout.plot.orientation,
            },
            built_up_area,
            coverage,
            rooms,
            diagnostics,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
