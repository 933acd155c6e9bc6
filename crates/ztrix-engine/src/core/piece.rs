use std::sync::LazyLock;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::{
    PieceTypeError,
    core::{active_piece::ActivePiece, board::Mino},
    geometry::{Point, PointSetRegion, Region, Rotation},
};

/// One offset per rotation state, indexed by [`Rotation`].
pub type OffsetTable = [Point; Rotation::LEN];

/// Maximum number of kick tables a piece type accepts.
pub const MAX_KICKS: usize = 4;

/// Kick offsets tried in order after a blocked rotation.
pub type Kicks = ArrayVec<Point, MAX_KICKS>;

/// Immutable template for one kind of piece.
///
/// A piece type owns its four rotated shapes and the kick offsets for every
/// pair of rotation states, both precomputed at construction.
///
/// # Shapes
///
/// The shape for rotation `r` is the canonical shape rotated by `r` about the
/// origin, then translated by the negated base offset for `r`. Base offsets
/// move the rotation center, which is how the I and O pieces turn about the
/// middle of their bounding box instead of a cell.
///
/// # Kicks
///
/// For a rotation from `from` to `to`, each kick table `t` contributes the
/// offset `t[to] - t[from]`, in table order. The offsets are tried only after
/// the un-kicked rotation collides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceType {
    mino: Mino,
    shapes: [PointSetRegion; Rotation::LEN],
    kicks: [[Kicks; Rotation::LEN]; Rotation::LEN],
}

impl PieceType {
    /// Builds a piece type from a canonical shape and offset tables.
    ///
    /// # Errors
    ///
    /// Returns [`PieceTypeError::TooManyKicks`] if more than [`MAX_KICKS`]
    /// kick tables are given.
    pub fn new<R>(
        mino: Mino,
        shape: &R,
        base_offsets: &OffsetTable,
        kick_offsets: &[OffsetTable],
    ) -> Result<Self, PieceTypeError>
    where
        R: Region + ?Sized,
    {
        if kick_offsets.len() > MAX_KICKS {
            return Err(PieceTypeError::TooManyKicks {
                count: kick_offsets.len(),
                max: MAX_KICKS,
            });
        }

        let shapes = Rotation::ALL.map(|rotation| {
            shape
                .rotate(rotation, Point::ORIGIN)
                .translate(-base_offsets[rotation.as_usize()])
        });
        let kicks = Rotation::ALL.map(|from| {
            Rotation::ALL.map(|to| {
                kick_offsets
                    .iter()
                    .map(|table| table[to.as_usize()] - table[from.as_usize()])
                    .collect()
            })
        });

        Ok(Self {
            mino,
            shapes,
            kicks,
        })
    }

    /// Occupant written to the board when a piece of this type is placed.
    #[must_use]
    pub fn mino(&self) -> Mino {
        self.mino
    }

    /// Kind of a catalog piece; `None` for custom types with another mino.
    #[must_use]
    pub fn kind(&self) -> Option<PieceKind> {
        match self.mino {
            Mino::Piece(kind) => Some(kind),
            Mino::Garbage => None,
        }
    }

    /// Shape in `rotation`, relative to the piece position.
    #[must_use]
    pub fn shape(&self, rotation: Rotation) -> &PointSetRegion {
        &self.shapes[rotation.as_usize()]
    }

    /// Kick offsets for rotating from `from` to `to`.
    #[must_use]
    pub fn kicks(&self, from: Rotation, to: Rotation) -> &[Point] {
        &self.kicks[from.as_usize()][to.as_usize()]
    }

    /// Creates an active piece of this type.
    #[must_use]
    pub fn spawn(&self, position: Point, rotation: Rotation) -> ActivePiece<'_> {
        ActivePiece::new(self, position, rotation)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the catalog entry for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ztrix_engine::{Mino, PieceKind, Region, Rotation};
    ///
    /// let t = PieceKind::T.piece_type();
    /// assert_eq!(t.mino(), Mino::Piece(PieceKind::T));
    /// assert_eq!(t.shape(Rotation::R0).len(), 4);
    /// assert_eq!(t.kicks(Rotation::R0, Rotation::Cw).len(), 4);
    /// ```
    #[must_use]
    pub fn piece_type(self) -> &'static PieceType {
        &CATALOG[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ztrix_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use ztrix_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }

    fn build_piece_type(self) -> Result<PieceType, PieceTypeError> {
        let (cells, base_offsets, kick_offsets): (_, _, &[OffsetTable]) = match self {
            PieceKind::I => (I_SHAPE, &I_BASE_OFFSETS, &I_KICK_OFFSETS),
            PieceKind::O => (O_SHAPE, &O_BASE_OFFSETS, &[]),
            PieceKind::S => (S_SHAPE, &ZERO_OFFSETS, &JLSTZ_KICK_OFFSETS),
            PieceKind::Z => (Z_SHAPE, &ZERO_OFFSETS, &JLSTZ_KICK_OFFSETS),
            PieceKind::J => (J_SHAPE, &ZERO_OFFSETS, &JLSTZ_KICK_OFFSETS),
            PieceKind::L => (L_SHAPE, &ZERO_OFFSETS, &JLSTZ_KICK_OFFSETS),
            PieceKind::T => (T_SHAPE, &ZERO_OFFSETS, &JLSTZ_KICK_OFFSETS),
        };
        let shape = PointSetRegion::new(cells).map_err(PieceTypeError::Shape)?;
        PieceType::new(Mino::Piece(self), &shape, base_offsets, kick_offsets)
    }
}

static CATALOG: LazyLock<[PieceType; PieceKind::LEN]> = LazyLock::new(|| {
    PieceKind::ALL.map(|kind| {
        kind.build_piece_type()
            .expect("built-in piece tables are valid")
    })
});

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

// Spawn orientations, rotation center at the origin, y up.
type Shape = [Point; 4];
const I_SHAPE: Shape = [p(-1, 0), p(0, 0), p(1, 0), p(2, 0)];
const O_SHAPE: Shape = [p(0, 0), p(1, 0), p(0, 1), p(1, 1)];
const S_SHAPE: Shape = [p(0, 1), p(1, 1), p(-1, 0), p(0, 0)];
const Z_SHAPE: Shape = [p(-1, 1), p(0, 1), p(0, 0), p(1, 0)];
const J_SHAPE: Shape = [p(-1, 1), p(-1, 0), p(0, 0), p(1, 0)];
const L_SHAPE: Shape = [p(1, 1), p(-1, 0), p(0, 0), p(1, 0)];
const T_SHAPE: Shape = [p(0, 1), p(-1, 0), p(0, 0), p(1, 0)];

const ZERO_OFFSETS: OffsetTable = [Point::ORIGIN; Rotation::LEN];
const I_BASE_OFFSETS: OffsetTable = [p(0, 0), p(-1, 0), p(-1, 1), p(0, 1)];
const O_BASE_OFFSETS: OffsetTable = [p(0, 0), p(0, -1), p(-1, -1), p(-1, 0)];

const JLSTZ_KICK_OFFSETS: [OffsetTable; 4] = [
    [p(0, 0), p(-1, 0), p(0, 0), p(1, 0)],
    [p(0, 0), p(-1, 1), p(0, 0), p(1, 1)],
    [p(0, 0), p(0, -2), p(0, 0), p(0, -2)],
    [p(0, 0), p(-1, -2), p(0, 0), p(1, -2)],
];
const I_KICK_OFFSETS: [OffsetTable; 4] = [
    [p(1, 0), p(-1, 0), p(-2, 0), p(0, 0)],
    [p(-2, 0), p(-1, 0), p(1, 0), p(0, 0)],
    [p(1, 0), p(-1, -1), p(-2, 1), p(0, 2)],
    [p(-2, 0), p(-1, 2), p(1, 1), p(0, -1)],
];
