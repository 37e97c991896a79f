use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub type Result<T> = std::result::Result<T, PlanError>;

/// Fatal failures; the request is aborted and the reason surfaced to the caller.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid plan: {reason}")]
    Input { reason: String },

    #[error("could not parse plan: {0}")]
    Parse(String),

    #[error("{kind} '{owner}' references unknown room '{room}'")]
    DanglingReference {
        kind: ReferenceKind,
        owner: String,
        room: String,
    },

    #[error("rendering failed: {0}")]
    Rendering(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PlanError {
    pub fn input(reason: impl Into<String>) -> Self {
        PlanError::Input {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Opening,
    Shaft,
    Adjacency,
    LoadBearingWall,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReferenceKind::Opening => "opening",
            ReferenceKind::Shaft => "shaft",
            ReferenceKind::Adjacency => "adjacency of",
            ReferenceKind::LoadBearingWall => "load-bearing wall",
        };
        f.write_str(label)
    }
}

/// Non-fatal quality warnings returned alongside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("no free cell for room '{room}', placed at the origin")]
    PlacementDegeneration { room: String },

    #[error("{reference} '{owner}' references unknown room '{room}'")]
    DanglingReference {
        reference: ReferenceKind,
        owner: String,
        room: String,
    },

    #[error("rooms '{room}' and '{neighbor}' are declared adjacent but share no wall")]
    UnsatisfiedAdjacency { room: String, neighbor: String },

    #[error("clamping room '{room}' into the plot made it overlap '{other}'")]
    ClampOverlap { room: String, other: String },

    #[error("room '{room}' has unrecognised type '{tag}'")]
    UnknownRoomType { room: String, tag: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "plan diagnostic");
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
