//! Undo records returned by every mutation.
//!
//! A record captures the state its mutation overwrote and is consumed by
//! `revert`, so it can be applied at most once. Dropping a record keeps the
//! mutation. Records from a sequence of mutations compose in an [`UndoLog`],
//! which reverts them last-first.

use crate::{
    core::{active_piece::ActivePiece, board::Board, board::Cell},
    geometry::{Point, Rotation},
};

/// Restores one cell overwritten by [`Board::set_cell`].
#[must_use = "dropping an undo record keeps the change"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUndo {
    position: Point,
    prior: Cell,
}

impl CellUndo {
    pub(crate) fn new(position: Point, prior: Cell) -> Self {
        Self { position, prior }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn prior(&self) -> Cell {
        self.prior
    }

    pub fn revert(self, board: &mut Board) {
        board.restore(self.position, self.prior);
    }
}

/// Restores the cells overwritten by [`Board::set_region`].
#[must_use = "dropping an undo record keeps the change"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionUndo {
    prior: Vec<(Point, Cell)>,
}

impl RegionUndo {
    pub(crate) fn new(prior: Vec<(Point, Cell)>) -> Self {
        Self { prior }
    }

    /// Overwritten cells in write order.
    #[must_use]
    pub fn prior(&self) -> &[(Point, Cell)] {
        &self.prior
    }

    pub fn revert(self, board: &mut Board) {
        for (position, cell) in self.prior {
            board.restore(position, cell);
        }
    }
}

/// Restores the position and rotation of an [`ActivePiece`].
#[must_use = "dropping an undo record keeps the change"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceUndo {
    position: Point,
    rotation: Rotation,
}

impl PieceUndo {
    pub(crate) fn new(position: Point, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn revert(self, piece: &mut ActivePiece<'_>) {
        piece.restore(self.position, self.rotation);
    }
}

/// Any undo record.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From, derive_more::IsVariant)]
pub enum Undo {
    Cell(CellUndo),
    Region(RegionUndo),
    Piece(PieceUndo),
}

impl Undo {
    pub fn revert(self, board: &mut Board, piece: &mut ActivePiece<'_>) {
        match self {
            Undo::Cell(undo) => undo.revert(board),
            Undo::Region(undo) => undo.revert(board),
            Undo::Piece(undo) => undo.revert(piece),
        }
    }
}

/// Ordered sequence of undo records.
///
/// # Example
///
/// ```
/// use ztrix_engine::{Board, Mino, PieceKind, Point, Rotation, UndoLog};
///
/// let mut board = Board::new(Point::new(10, 20))?;
/// let mut piece = PieceKind::L.piece_type().spawn(Point::new(4, 10), Rotation::R0);
///
/// let mut log = UndoLog::new();
/// log.push(board.set_cell(Point::new(0, 0), Mino::Garbage)?);
/// log.extend(piece.move_by(&board, Point::RIGHT));
/// log.extend(piece.rotate(&board, Rotation::Cw));
/// assert_eq!(log.len(), 3);
///
/// log.revert(&mut board, &mut piece);
/// assert_eq!(board.occupied_count(), 0);
/// assert_eq!(piece.position(), Point::new(4, 10));
/// assert_eq!(piece.rotation(), Rotation::R0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use = "dropping an undo record keeps the change"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoLog {
    records: Vec<Undo>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, undo: impl Into<Undo>) {
        self.records.push(undo.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order they were pushed.
    #[must_use]
    pub fn records(&self) -> &[Undo] {
        &self.records
    }

    /// Reverts every record, most recent first.
    pub fn revert(self, board: &mut Board, piece: &mut ActivePiece<'_>) {
        for undo in self.records.into_iter().rev() {
            undo.revert(board, piece);
        }
    }
}

impl<U> Extend<U> for UndoLog
where
    U: Into<Undo>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = U>,
    {
        self.records.extend(iter.into_iter().map(Into::into));
    }
}

impl<U> FromIterator<U> for UndoLog
where
    U: Into<Undo>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = U>,
    {
        let mut log = Self::new();
        log.extend(iter);
        log
    }
}
