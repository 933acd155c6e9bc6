use crate::{
    BoardError,
    core::{
        board::{Board, Mino},
        piece::{PieceKind, PieceType},
        undo::{PieceUndo, UndoLog},
    },
    geometry::{Point, PointSetRegion, Region, Rotation},
};

/// A piece being controlled on a board.
///
/// The piece borrows its [`PieceType`] and tracks a position and rotation.
/// It does not own a board: collision-aware operations take the board they
/// check against, so one board can serve any number of speculative pieces.
///
/// Every state change returns a [`PieceUndo`] that puts the piece back.
///
/// # Example
///
/// ```
/// use ztrix_engine::{Board, PieceKind, Point, Rotation};
///
/// let board = Board::new(Point::new(10, 20))?;
/// let mut piece = PieceKind::S.piece_type().spawn(Point::new(4, 18), Rotation::R0);
///
/// let undo = piece.move_by(&board, Point::new(-4, 0));
/// assert!(undo.is_none(), "the left wall blocks the move");
///
/// let undo = piece.move_by(&board, Point::LEFT).unwrap();
/// assert_eq!(piece.position(), Point::new(3, 18));
/// undo.revert(&mut piece);
/// assert_eq!(piece.position(), Point::new(4, 18));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece<'a> {
    piece_type: &'a PieceType,
    position: Point,
    rotation: Rotation,
}

impl<'a> ActivePiece<'a> {
    #[must_use]
    pub fn new(piece_type: &'a PieceType, position: Point, rotation: Rotation) -> Self {
        Self {
            piece_type,
            position,
            rotation,
        }
    }

    #[must_use]
    pub fn piece_type(&self) -> &'a PieceType {
        self.piece_type
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> Option<PieceKind> {
        self.piece_type.kind()
    }

    #[must_use]
    pub fn mino(&self) -> Mino {
        self.piece_type.mino()
    }

    /// Cells covered by the piece in board coordinates.
    #[must_use]
    pub fn region(&self) -> PointSetRegion {
        self.piece_type
            .shape(self.rotation)
            .translate(self.position)
    }

    /// Moves the piece without a collision check.
    pub fn set_position(&mut self, position: Point) -> PieceUndo {
        let undo = self.snapshot();
        self.position = position;
        undo
    }

    /// Rotates the piece in place without a collision check or kicks.
    pub fn set_rotation(&mut self, rotation: Rotation) -> PieceUndo {
        let undo = self.snapshot();
        self.rotation = rotation;
        undo
    }

    /// Returns `true` if the piece overlaps an occupied cell or leaves the board.
    #[must_use]
    pub fn is_colliding(&self, board: &Board) -> bool {
        !board.is_region_empty(&self.region())
    }

    /// Translates the piece by `offset` if the destination is free.
    ///
    /// Returns `None` and leaves the piece unchanged if the destination
    /// collides.
    pub fn move_by(&mut self, board: &Board, offset: Point) -> Option<PieceUndo> {
        let undo = self.set_position(self.position + offset);
        if self.is_colliding(board) {
            undo.revert(self);
            return None;
        }
        Some(undo)
    }

    /// Rotates the piece by `direction`, trying kicks if the plain rotation
    /// collides.
    ///
    /// The kick offsets come from the piece type for the current and target
    /// rotation, and are tried in order relative to the original position.
    /// Returns `None` and leaves the piece unchanged if every candidate
    /// collides.
    pub fn rotate(&mut self, board: &Board, direction: Rotation) -> Option<PieceUndo> {
        let from = self.rotation;
        let to = from + direction;
        let undo = self.set_rotation(to);
        if !self.is_colliding(board) {
            return Some(undo);
        }

        let piece_type = self.piece_type;
        for (index, &kick) in piece_type.kicks(from, to).iter().enumerate() {
            self.position = undo.position() + kick;
            if !self.is_colliding(board) {
                log::trace!("rotation {from} -> {to} succeeded with kick #{index} {kick}");
                return Some(undo);
            }
        }

        log::trace!("rotation {from} -> {to} blocked at {}", undo.position());
        undo.revert(self);
        None
    }

    /// Number of rows the piece can fall before it lands.
    ///
    /// The piece is moved while measuring and put back before returning.
    pub fn drop_distance(&mut self, board: &Board) -> u32 {
        let Some(start) = self.move_by(board, Point::DOWN) else {
            return 0;
        };
        let mut distance = 1;
        while self.move_by(board, Point::DOWN).is_some() {
            distance += 1;
        }
        start.revert(self);
        distance
    }

    /// Cells the piece would cover after a hard drop.
    ///
    /// The piece is left where it is.
    pub fn landing_region(&mut self, board: &Board) -> PointSetRegion {
        let start = self.snapshot();
        while self.move_by(board, Point::DOWN).is_some() {}
        let region = self.region();
        start.revert(self);
        region
    }

    /// Hard-drops the piece and writes it into the board.
    ///
    /// The piece moves down until blocked, then its cells are written with
    /// its [`Mino`]. The returned log reverts both the write and the drop.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RegionOutOfBounds`] if the piece is not fully on
    /// the board; neither the board nor the piece is changed.
    pub fn place(&mut self, board: &mut Board) -> Result<UndoLog, BoardError> {
        let start = self.snapshot();
        while self.move_by(board, Point::DOWN).is_some() {}

        let region = self.region();
        let written = match board.set_region(&region, self.mino()) {
            Ok(written) => written,
            Err(err) => {
                start.revert(self);
                return Err(err);
            }
        };
        log::debug!(
            "placed {:?} at {} rotation {} after dropping {} rows",
            self.mino(),
            self.position,
            self.rotation,
            start.position().y - self.position.y,
        );

        let mut undo = UndoLog::new();
        undo.push(start);
        undo.push(written);
        Ok(undo)
    }

    /// Same as [`PieceUndo::revert`].
    pub fn revert(&mut self, undo: PieceUndo) {
        undo.revert(self);
    }

    fn snapshot(&self) -> PieceUndo {
        PieceUndo::new(self.position, self.rotation)
    }

    pub(crate) fn restore(&mut self, position: Point, rotation: Rotation) {
        self.position = position;
        self.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn empty_board() -> Board {
        Board::new(Point::new(10, 20)).unwrap()
    }

    fn spawn(kind: PieceKind, x: i32, y: i32) -> ActivePiece<'static> {
        kind.piece_type().spawn(Point::new(x, y), Rotation::R0)
    }

    #[test]
    fn test_region_follows_position_and_rotation() {
        let mut piece = spawn(PieceKind::T, 4, 5);
        let cells = |piece: &ActivePiece<'_>| {
            piece
                .region()
                .points()
                .map(|p| (p.x, p.y))
                .collect::<Vec<_>>()
        };
        assert_eq!(cells(&piece), [(3, 5), (4, 5), (5, 5), (4, 6)]);

        let _ = piece.set_rotation(Rotation::Cw);
        assert_eq!(cells(&piece), [(4, 4), (4, 5), (5, 5), (4, 6)]);

        let _ = piece.set_position(Point::new(0, 0));
        assert_eq!(cells(&piece), [(0, -1), (0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_set_position_and_rotation_revert() {
        let mut piece = spawn(PieceKind::J, 4, 5);
        let moved = piece.set_position(Point::new(7, 2));
        let turned = piece.set_rotation(Rotation::R180);
        assert_eq!(piece.position(), Point::new(7, 2));
        assert_eq!(piece.rotation(), Rotation::R180);

        piece.revert(turned);
        assert_eq!(piece.rotation(), Rotation::R0);
        assert_eq!(piece.position(), Point::new(7, 2));
        moved.revert(&mut piece);
        assert_eq!(piece.position(), Point::new(4, 5));
    }

    #[test]
    fn test_is_colliding() {
        let board = Board::from_ascii(
            "
            ....
            ....
            #...
            ",
        )
        .unwrap();
        let mut piece = spawn(PieceKind::T, 1, 1);
        assert!(!piece.is_colliding(&board));

        let _ = piece.set_position(Point::new(1, 0));
        assert!(piece.is_colliding(&board), "overlaps garbage");

        let _ = piece.set_position(Point::new(0, 1));
        assert!(piece.is_colliding(&board), "leaves the board");
    }

    #[test]
    fn test_move_by() {
        let board = empty_board();
        let mut piece = spawn(PieceKind::O, 0, 0);

        assert!(piece.move_by(&board, Point::LEFT).is_none());
        assert!(piece.move_by(&board, Point::DOWN).is_none());
        assert_eq!(piece.position(), Point::ORIGIN);

        let undo = piece.move_by(&board, Point::new(3, 7)).unwrap();
        assert_eq!(piece.position(), Point::new(3, 7));
        undo.revert(&mut piece);
        assert_eq!(piece.position(), Point::ORIGIN);
    }

    #[test]
    fn test_rotate_without_kick() {
        let board = empty_board();
        let mut piece = spawn(PieceKind::T, 4, 10);
        let undo = piece.rotate(&board, Rotation::Cw).unwrap();
        assert_eq!(piece.rotation(), Rotation::Cw);
        assert_eq!(piece.position(), Point::new(4, 10));

        undo.revert(&mut piece);
        assert_eq!(piece.rotation(), Rotation::R0);
    }

    #[test]
    fn test_rotate_uses_first_free_kick() {
        let mut board = empty_board();
        for x in [3, 4] {
            let _ = board
                .set_cell(Point::new(x, 4), Mino::Garbage)
                .unwrap();
        }
        let mut piece = spawn(PieceKind::T, 4, 5);

        let undo = piece.rotate(&board, Rotation::Cw).unwrap();
        assert_eq!(piece.rotation(), Rotation::Cw);
        assert_eq!(piece.position(), Point::new(3, 6));
        assert!(!piece.is_colliding(&board));

        undo.revert(&mut piece);
        assert_eq!(piece.position(), Point::new(4, 5));
        assert_eq!(piece.rotation(), Rotation::R0);
    }

    #[test]
    fn test_rotate_blocked_leaves_piece_unchanged() {
        let board = Board::from_ascii(
            "
            ###.###
            ##...##
            #######
            #######
            ",
        )
        .unwrap();
        let mut piece = spawn(PieceKind::T, 3, 2);
        assert!(!piece.is_colliding(&board));

        for direction in [Rotation::Cw, Rotation::R180, Rotation::Ccw] {
            assert!(piece.rotate(&board, direction).is_none(), "{direction}");
            assert_eq!(piece.position(), Point::new(3, 2));
            assert_eq!(piece.rotation(), Rotation::R0);
        }
    }

    #[test]
    fn test_o_rotation_keeps_cells() {
        let board = empty_board();
        let mut piece = spawn(PieceKind::O, 4, 4);
        let before = piece.region();
        for direction in [Rotation::Cw, Rotation::R180, Rotation::Ccw] {
            assert!(piece.rotate(&board, direction).is_some());
            assert_eq!(piece.region(), before);
            assert_eq!(piece.position(), Point::new(4, 4));
        }
    }

    #[test]
    fn test_i_rotate_then_place_and_revert() {
        let mut board = empty_board();
        let mut piece = spawn(PieceKind::I, 4, 10);

        let turned = piece.rotate(&board, Rotation::Cw).unwrap();
        assert_eq!(piece.position(), Point::new(4, 10));
        assert!(
            piece
                .region()
                .points()
                .all(|p| p.x == 5 && (8..=11).contains(&p.y))
        );

        turned.revert(&mut piece);
        let undo = piece.place(&mut board).unwrap();
        assert_eq!(piece.position(), Point::new(4, 0));
        assert_eq!(board.occupied_count(), 4);
        for x in 3..=6 {
            assert_eq!(
                board.get(Point::new(x, 0)).unwrap(),
                Some(Mino::Piece(PieceKind::I))
            );
        }

        undo.revert(&mut board, &mut piece);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(piece.position(), Point::new(4, 10));
        assert_eq!(piece.rotation(), Rotation::R0);
    }

    #[test]
    fn test_place_lands_on_stack() {
        let mut board = Board::from_ascii(
            "
            ....
            ....
            ....
            .#..
            ",
        )
        .unwrap();
        let mut piece = spawn(PieceKind::T, 1, 2);
        let undo = piece.place(&mut board).unwrap();
        assert_eq!(piece.position(), Point::new(1, 1));
        assert_eq!(
            board.to_string(),
            "....\n.T..\nTTT.\n.#..\n"
        );
        assert_eq!(undo.len(), 2);
        assert!(undo.records()[0].is_piece());
        assert!(undo.records()[1].is_region());
    }

    #[test]
    fn test_place_out_of_bounds_changes_nothing() {
        let mut board = empty_board();
        let mut piece = spawn(PieceKind::T, 0, 10);
        let before = board.clone();

        let err = piece.place(&mut board).unwrap_err();
        assert!(err.is_region_out_of_bounds());
        assert_eq!(board, before);
        assert_eq!(piece.position(), Point::new(0, 10));
    }

    #[test]
    fn test_drop_distance_and_landing_region() {
        let board = Board::from_ascii(
            "
            ......
            ......
            ......
            ......
            ..#...
            ",
        )
        .unwrap();
        let mut piece = spawn(PieceKind::T, 2, 3);
        assert_eq!(piece.drop_distance(&board), 2);
        assert_eq!(piece.position(), Point::new(2, 3));

        let landing = piece.landing_region(&board);
        assert_eq!(
            landing,
            PointSetRegion::new([
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(2, 2),
            ])
            .unwrap()
        );
        assert_eq!(piece.position(), Point::new(2, 3));

        let _ = piece.set_position(Point::new(2, 1));
        assert_eq!(piece.drop_distance(&board), 0);
    }

    fn piece_kind() -> impl Strategy<Value = PieceKind> {
        (0..PieceKind::LEN).prop_map(|i| PieceKind::ALL[i])
    }

    fn rotation() -> impl Strategy<Value = Rotation> {
        (0..4u8).prop_map(Rotation::from_quarter_turns)
    }

    proptest! {
        #[test]
        fn successful_moves_never_collide(
            kind in piece_kind(),
            steps in prop::collection::vec((rotation(), -1..=1i32, -1..=0i32), 1..40),
        ) {
            let board = Board::from_ascii(
                "
                ..........
                ..........
                ..........
                ..........
                ..........
                ..........
                ..........
                ....##....
                #.......##
                ###..#####
                ",
            )
            .unwrap();
            let mut piece = kind.piece_type().spawn(Point::new(4, 7), Rotation::R0);
            prop_assume!(!piece.is_colliding(&board));

            let mut log = UndoLog::new();
            for (direction, dx, dy) in steps {
                log.extend(piece.rotate(&board, direction));
                log.extend(piece.move_by(&board, Point::new(dx, dy)));
                prop_assert!(!piece.is_colliding(&board));
            }

            let mut board = board;
            let before = board.clone();
            log.revert(&mut board, &mut piece);
            prop_assert_eq!(piece.position(), Point::new(4, 7));
            prop_assert_eq!(piece.rotation(), Rotation::R0);
            prop_assert_eq!(board, before);
        }

        #[test]
        fn place_then_revert_restores_board(kind in piece_kind(), x in 1..8i32, r in rotation()) {
            let mut board = Board::from_ascii(
                "
                ..........
                ..........
                ..........
                ..........
                ..#.......
                ..##...#..
                ",
            )
            .unwrap();
            let before = board.clone();
            let mut piece = kind.piece_type().spawn(Point::new(x, 4), r);
            prop_assume!(!piece.is_colliding(&board));

            let undo = piece.place(&mut board).unwrap();
            prop_assert_eq!(board.occupied_count(), before.occupied_count() + 4);
            undo.revert(&mut board, &mut piece);
            prop_assert_eq!(board, before);
            prop_assert_eq!(piece.position(), Point::new(x, 4));
        }
    }
}
