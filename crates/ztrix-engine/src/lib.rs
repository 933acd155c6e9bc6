//! Model layer for a falling-block puzzle game.
//!
//! The crate provides the grid, the piece catalog with its rotation system and
//! a controllable active piece. Every mutation returns an undo record, so
//! speculative moves can be applied and rolled back without cloning the board:
//!
//! - [`geometry`] - points, rotations, rectangles and regions
//! - [`Board`] - the grid of [`Cell`]s with revertible writes
//! - [`PieceKind`] / [`PieceType`] - the seven pieces, their shapes and kicks
//! - [`ActivePiece`] - move, rotate and place with collision checks
//! - [`UndoLog`] - composition of undo records
//!
//! # Example
//!
//! ```
//! use ztrix_engine::{Board, PieceKind, Point, Rotation};
//!
//! let mut board = Board::new(Point::new(10, 20))?;
//! let mut piece = PieceKind::T.piece_type().spawn(Point::new(4, 18), Rotation::R0);
//!
//! assert!(piece.move_by(&board, Point::LEFT).is_some());
//! assert!(piece.rotate(&board, Rotation::Cw).is_some());
//!
//! let placement = piece.place(&mut board)?;
//! assert_eq!(board.occupied_count(), 4);
//!
//! placement.revert(&mut board, &mut piece);
//! assert_eq!(board.occupied_count(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{core::*, geometry::*};

pub mod core;
pub mod geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeometryError {
    #[display("rectangle maximum {maximum} must exceed minimum {minimum} on both axes")]
    EmptyRectangle { minimum: Point, maximum: Point },
    #[display("region must contain at least one point")]
    EmptyRegion,
    #[display("cell {point} is outside the supported coordinate range")]
    CoordinateOverflow { point: Point },
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum BoardError {
    #[display("board size {size} must be positive on both axes")]
    InvalidSize { size: Point },
    #[display("position {position} is outside the board bounds {bounds}")]
    OutOfBounds { position: Point, bounds: Rectangle },
    #[display("region bounds {region} are not within the board bounds {bounds}")]
    RegionOutOfBounds { region: Rectangle, bounds: Rectangle },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board text has no rows")]
    Empty,
    #[display("board text is too large")]
    TooLarge,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("unknown cell {cell:?} in row {row}")]
    UnknownCell { row: usize, cell: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceTypeError {
    #[display("{count} kick tables given, at most {max} supported")]
    TooManyKicks { count: usize, max: usize },
    #[display("invalid piece shape")]
    Shape(GeometryError),
}
