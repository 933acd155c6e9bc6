pub use self::{active_piece::*, board::*, piece::*, undo::*};

pub(crate) mod active_piece;
pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod undo;
