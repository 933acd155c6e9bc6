use std::path::PathBuf;

use anyhow::Context;
use ztrix_engine::{Board, Mino, Point};

use crate::{
    driver::Driver,
    schema::{report::RunReport, script::ReplayScript},
    util::{self, Output, OutputFormat},
};

#[derive(Debug, Clone, clap::Args)]
pub struct ReplayArg {
    /// Path to the replay script (JSON format)
    script_file: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        script_file,
        output,
        format,
    } = arg;

    log::info!("Loading replay script from {}", script_file.display());
    let script: ReplayScript = util::read_json_file("replay script", script_file)?;
    let report = replay(&script)?;

    let mut output = Output::from_output_path(output.clone())?;
    output.write_as(&report, *format)?;
    Ok(())
}

fn replay(script: &ReplayScript) -> anyhow::Result<RunReport> {
    let size = Point::new(script.width, script.height);
    let mut board = Board::new(size).context("Invalid board size in replay script")?;
    for &position in &script.garbage {
        let _ = board
            .set_cell(position, Mino::Garbage)
            .with_context(|| format!("Invalid garbage cell {position}"))?;
    }

    let mut driver = Driver::new(board);
    for (index, piece) in script.pieces.iter().enumerate() {
        let placed = driver.play_piece(
            piece.kind,
            piece.position,
            piece.rotation,
            piece.actions.iter().copied(),
        )?;
        if !placed {
            log::warn!(
                "Piece #{index} is blocked at spawn; skipping {} remaining pieces",
                script.pieces.len() - index - 1
            );
            break;
        }
    }
    Ok(driver.finish())
}

#[cfg(test)]
mod tests {
    use ztrix_engine::PieceKind;

    use super::*;
    use crate::schema::script::{Action, ScriptedPiece};

    fn piece(kind: PieceKind, x: i32, actions: Vec<Action>) -> ScriptedPiece {
        ScriptedPiece {
            kind,
            position: Point::new(x, 18),
            rotation: ztrix_engine::Rotation::R0,
            actions,
        }
    }

    #[test]
    fn test_replay_stacks_pieces() {
        let script = ReplayScript {
            width: 6,
            height: 20,
            garbage: vec![Point::new(5, 0)],
            pieces: vec![
                piece(PieceKind::I, 1, vec![]),
                piece(PieceKind::O, 1, vec![Action::Left, Action::Place]),
            ],
        };
        let report = replay(&script).unwrap();
        assert_eq!(report.summary.pieces_placed, 2);
        assert_eq!(report.summary.occupied_cells, 9);
        let text = report.board.to_string();
        let bottom = text.lines().rev().take(3).collect::<Vec<_>>();
        assert_eq!(bottom, ["IIII.#", "OO....", "OO...."]);
    }

    #[test]
    fn test_replay_rejects_bad_garbage() {
        let script = ReplayScript {
            width: 4,
            height: 4,
            garbage: vec![Point::new(4, 0)],
            pieces: vec![],
        };
        assert!(replay(&script).is_err());
    }

    #[test]
    fn test_replay_stops_when_topped_out() {
        let script = ReplayScript {
            width: 4,
            height: 3,
            garbage: vec![],
            pieces: vec![
                ScriptedPiece {
                    position: Point::new(1, 1),
                    ..piece(PieceKind::O, 0, vec![])
                };
                3
            ],
        };
        let report = replay(&script).unwrap();
        assert!(report.summary.topped_out);
        assert_eq!(report.summary.pieces_placed, 1);
    }
}
