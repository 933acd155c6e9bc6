//! Applies scripted or generated actions to pieces on a board.

use anyhow::Context;
use ztrix_engine::{ActivePiece, Board, PieceKind, Point, Rotation};

use crate::schema::{
    report::{RunReport, RunSummary},
    script::Action,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Applied,
    Kicked,
    Rejected,
}

fn apply(piece: &mut ActivePiece<'_>, board: &Board, action: Action) -> Outcome {
    let offset = match action {
        Action::Left => Point::LEFT,
        Action::Right => Point::RIGHT,
        Action::Down => Point::DOWN,
        Action::RotateCw => return rotate(piece, board, Rotation::Cw),
        Action::RotateCcw => return rotate(piece, board, Rotation::Ccw),
        Action::Rotate180 => return rotate(piece, board, Rotation::R180),
        Action::Place => return Outcome::Applied,
    };
    match piece.move_by(board, offset) {
        Some(_) => Outcome::Applied,
        None => Outcome::Rejected,
    }
}

fn rotate(piece: &mut ActivePiece<'_>, board: &Board, direction: Rotation) -> Outcome {
    let before = piece.position();
    match piece.rotate(board, direction) {
        None => Outcome::Rejected,
        Some(_) if piece.position() != before => Outcome::Kicked,
        Some(_) => Outcome::Applied,
    }
}

/// Owns a board and drives one piece at a time on it.
#[derive(Debug)]
pub struct Driver {
    board: Board,
    summary: RunSummary,
}

impl Driver {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            summary: RunSummary::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_topped_out(&self) -> bool {
        self.summary.topped_out
    }

    /// Spawns a piece, applies `actions` up to the first `place` and locks it.
    ///
    /// Returns `false` without touching the board if the spawn position is
    /// blocked; the run is then marked as topped out.
    pub fn play_piece<I>(
        &mut self,
        kind: PieceKind,
        position: Point,
        rotation: Rotation,
        actions: I,
    ) -> anyhow::Result<bool>
    where
        I: IntoIterator<Item = Action>,
    {
        let mut piece = kind.piece_type().spawn(position, rotation);
        if piece.is_colliding(&self.board) {
            log::info!("{kind:?} cannot spawn at {position} rotation {rotation}");
            self.summary.topped_out = true;
            return Ok(false);
        }

        for action in actions {
            if action == Action::Place {
                break;
            }
            match apply(&mut piece, &self.board, action) {
                Outcome::Applied => {}
                Outcome::Kicked => self.summary.kicked_rotations += 1,
                Outcome::Rejected => {
                    log::debug!("{kind:?} at {}: {action:?} rejected", piece.position());
                    self.summary.rejected_actions += 1;
                }
            }
        }

        let _ = piece
            .place(&mut self.board)
            .with_context(|| format!("Failed to place {kind:?} at {}", piece.position()))?;
        self.summary.pieces_placed += 1;
        Ok(true)
    }

    pub fn finish(self) -> RunReport {
        let Self { board, mut summary } = self;
        summary.occupied_cells = board.occupied_count();
        RunReport { summary, board }
    }
}
