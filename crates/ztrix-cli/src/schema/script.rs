use serde::{Deserialize, Serialize};
use ztrix_engine::{PieceKind, Point, Rotation};

/// Scripted session read by `ztrix replay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    /// Board width in cells
    pub width: i32,
    /// Board height in cells
    pub height: i32,
    /// Cells filled with garbage before the first piece
    #[serde(default)]
    pub garbage: Vec<Point>,
    /// Pieces in play order
    pub pieces: Vec<ScriptedPiece>,
}

/// One piece of a replay script.
///
/// The piece is spawned at `position` with `rotation`, then `actions` are
/// applied in order. A `place` action (explicit or implied at the end) locks
/// the piece; later actions are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedPiece {
    pub kind: PieceKind,
    pub position: Point,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A single input applied to the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    #[serde(rename = "rotate-180")]
    Rotate180,
    Place,
}
