use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    BoardError, ParseBoardError,
    core::{
        piece::PieceKind,
        undo::{CellUndo, RegionUndo},
    },
    geometry::{Point, Rectangle, Region},
};

/// Occupant of a board cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Mino {
    /// A cell locked from a placed piece.
    Piece(PieceKind),
    /// A cell that did not come from a piece, such as a garbage line.
    Garbage,
}

impl Mino {
    /// Returns the character used for this occupant in board text.
    ///
    /// # Examples
    ///
    /// ```
    /// use ztrix_engine::{Mino, PieceKind};
    ///
    /// assert_eq!(Mino::Piece(PieceKind::S).as_char(), 'S');
    /// assert_eq!(Mino::Garbage.as_char(), '#');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Mino::Piece(kind) => kind.as_char(),
            Mino::Garbage => '#',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Mino::Garbage),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Mino::Piece(kind)),
                None => None,
            },
        }
    }
}

/// Content of one grid position; `None` is empty.
pub type Cell = Option<Mino>;

const EMPTY_CHAR: char = '.';

fn cell_char(cell: Cell) -> char {
    cell.map_or(EMPTY_CHAR, Mino::as_char)
}

fn cell_from_char(c: char) -> Option<Cell> {
    if c == EMPTY_CHAR {
        Some(None)
    } else {
        Mino::from_char(c).map(Some)
    }
}

/// Rectangular grid of [`Cell`]s anchored at the origin.
///
/// The board covers `[0, width) x [0, height)` with y increasing upward, so
/// row 0 is the floor. Every write returns an undo record that restores the
/// overwritten cells when reverted.
///
/// # Text form
///
/// [`Board::from_ascii`], [`Display`](fmt::Display) and the serde
/// representation use one line per row, top row first. `.` is empty, `#` is
/// garbage and a piece letter is a cell locked from that piece.
///
/// ```
/// use ztrix_engine::{Board, Mino, PieceKind, Point};
///
/// let board = Board::from_ascii(
///     "
///     ....
///     .T..
///     TTT#
///     ",
/// )?;
/// assert_eq!(board.width(), 4);
/// assert_eq!(board.height(), 3);
/// assert_eq!(board.get(Point::new(1, 1))?, Some(Mino::Piece(PieceKind::T)));
/// assert_eq!(board.get(Point::new(3, 0))?, Some(Mino::Garbage));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bounds: Rectangle,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] unless both components are positive.
    pub fn new(size: Point) -> Result<Self, BoardError> {
        let bounds =
            Rectangle::new(Point::ORIGIN, size).map_err(|_| BoardError::InvalidSize { size })?;
        let width = bounds.width() as usize;
        let height = bounds.height() as usize;
        Ok(Self {
            bounds,
            width,
            cells: vec![None; width * height],
        })
    }

    /// Parses a board from its text form.
    ///
    /// Lines are trimmed and blank lines skipped. The first remaining line is
    /// the top row.
    pub fn from_ascii(art: &str) -> Result<Self, ParseBoardError> {
        let lines = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let expected = lines.first().ok_or(ParseBoardError::Empty)?.chars().count();
        let width = i32::try_from(expected).map_err(|_| ParseBoardError::TooLarge)?;
        let height = i32::try_from(lines.len()).map_err(|_| ParseBoardError::TooLarge)?;
        let mut board =
            Self::new(Point::new(width, height)).map_err(|_| ParseBoardError::TooLarge)?;

        for (row, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(ParseBoardError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            let y = lines.len() - 1 - row;
            for (x, c) in line.chars().enumerate() {
                board.cells[y * board.width + x] =
                    cell_from_char(c).ok_or(ParseBoardError::UnknownCell { row, cell: c })?;
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    /// Returns the cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `position` is off the board.
    pub fn get(&self, position: Point) -> Result<Cell, BoardError> {
        self.check(position)?;
        Ok(self.cells[self.index(position)])
    }

    /// Returns `true` if every point of `region` is on the board and empty.
    ///
    /// A region that reaches outside the board is never empty, which makes
    /// the board edges behave like walls for collision checks.
    pub fn is_region_empty<R>(&self, region: &R) -> bool
    where
        R: Region + ?Sized,
    {
        self.bounds.contains_region(region)
            && region.points().all(|p| self.cells[self.index(p)].is_none())
    }

    /// Writes `mino` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `position` is off the board; the
    /// board is left unchanged.
    pub fn set_cell(&mut self, position: Point, mino: Mino) -> Result<CellUndo, BoardError> {
        self.write_cell(position, Some(mino))
    }

    /// Empties the cell at `position`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::set_cell`].
    pub fn clear_cell(&mut self, position: Point) -> Result<CellUndo, BoardError> {
        self.write_cell(position, None)
    }

    /// Writes `mino` at every point of `region`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RegionOutOfBounds`] if any point of `region` is
    /// off the board; no cell is written in that case.
    pub fn set_region<R>(&mut self, region: &R, mino: Mino) -> Result<RegionUndo, BoardError>
    where
        R: Region + ?Sized,
    {
        self.write_region(region, Some(mino))
    }

    /// Empties every point of `region`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::set_region`].
    pub fn clear_region<R>(&mut self, region: &R) -> Result<RegionUndo, BoardError>
    where
        R: Region + ?Sized,
    {
        self.write_region(region, None)
    }

    /// Iterates over rows from the floor upward.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + ExactSizeIterator + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Counts the occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn write_cell(&mut self, position: Point, cell: Cell) -> Result<CellUndo, BoardError> {
        self.check(position)?;
        let index = self.index(position);
        let prior = std::mem::replace(&mut self.cells[index], cell);
        Ok(CellUndo::new(position, prior))
    }

    fn write_region<R>(&mut self, region: &R, cell: Cell) -> Result<RegionUndo, BoardError>
    where
        R: Region + ?Sized,
    {
        if !self.bounds.contains_region(region) {
            return Err(BoardError::RegionOutOfBounds {
                region: region.bounds(),
                bounds: self.bounds,
            });
        }
        let mut prior = Vec::with_capacity(region.len());
        for p in region.points() {
            let index = self.index(p);
            prior.push((p, std::mem::replace(&mut self.cells[index], cell)));
        }
        Ok(RegionUndo::new(prior))
    }

    /// Writes a cell recorded by an undo record back into place.
    pub(crate) fn restore(&mut self, position: Point, cell: Cell) {
        let index = self.index(position);
        self.cells[index] = cell;
    }

    fn check(&self, position: Point) -> Result<(), BoardError> {
        if self.bounds.contains(position) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                position,
                bounds: self.bounds,
            })
        }
    }

    fn index(&self, position: Point) -> usize {
        debug_assert!(self.bounds.contains(position));
        position.y.unsigned_abs() as usize * self.width + position.x.unsigned_abs() as usize
    }

    fn text_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows()
            .rev()
            .map(|row| row.iter().copied().map(cell_char).collect())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.text_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.text_rows())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        if rows.iter().any(|row| row.trim().is_empty()) {
            return Err(serde::de::Error::custom("board rows must not be blank"));
        }
        Self::from_ascii(&rows.join("\n")).map_err(serde::de::Error::custom)
    }
}
