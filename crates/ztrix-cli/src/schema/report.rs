use std::fmt;

use serde::Serialize;
use ztrix_engine::{Board, PieceKind, Point, Rotation};

/// Counters collected while driving pieces on a board.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub pieces_placed: usize,
    /// Moves and rotations refused because of a collision
    pub rejected_actions: usize,
    /// Rotations that only fit after a kick
    pub kicked_rotations: usize,
    pub occupied_cells: usize,
    /// Whether a piece could not spawn
    pub topped_out: bool,
}

/// Final state of a `replay` or `simulate` run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub board: Board,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RunSummary {
            pieces_placed,
            rejected_actions,
            kicked_rotations,
            occupied_cells,
            topped_out,
        } = &self.summary;
        write!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "pieces placed:    {pieces_placed}")?;
        writeln!(f, "rejected actions: {rejected_actions}")?;
        writeln!(f, "kicked rotations: {kicked_rotations}")?;
        writeln!(f, "occupied cells:   {occupied_cells}")?;
        writeln!(f, "topped out:       {}", if *topped_out { "yes" } else { "no" })?;
        Ok(())
    }
}

/// Kick offsets of one piece kind for every rotation change.
#[derive(Debug, Clone, Serialize)]
pub struct KickTable {
    pub kind: PieceKind,
    pub transitions: Vec<KickTransition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KickTransition {
    pub from: Rotation,
    pub to: Rotation,
    pub kicks: Vec<Point>,
}

impl KickTable {
    pub fn new(kind: PieceKind) -> Self {
        let piece_type = kind.piece_type();
        let transitions = Rotation::ALL
            .into_iter()
            .flat_map(|from| Rotation::ALL.into_iter().map(move |to| (from, to)))
            .filter(|(from, to)| from != to)
            .map(|(from, to)| KickTransition {
                from,
                to,
                kicks: piece_type.kicks(from, to).to_vec(),
            })
            .collect();
        Self { kind, transitions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_table_lists_every_transition() {
        let table = KickTable::new(PieceKind::T);
        assert_eq!(table.transitions.len(), 12);
        let zero_to_cw = table
            .transitions
            .iter()
            .find(|t| t.from == Rotation::R0 && t.to == Rotation::Cw)
            .unwrap();
        assert_eq!(zero_to_cw.kicks[0], Point::new(-1, 0));

        let o = KickTable::new(PieceKind::O);
        assert!(o.transitions.iter().all(|t| t.kicks.is_empty()));
    }

    #[test]
    fn test_report_text() {
        let report = RunReport {
            summary: RunSummary {
                pieces_placed: 1,
                rejected_actions: 2,
                kicked_rotations: 0,
                occupied_cells: 4,
                topped_out: false,
            },
            board: Board::from_ascii(".T..\nTTT.\n").unwrap(),
        };
        let text = report.to_string();
        assert!(text.starts_with(".T..\nTTT.\n\n"));
        assert!(text.contains("pieces placed:    1\n"));
        assert!(text.contains("rejected actions: 2\n"));
        assert!(text.ends_with("topped out:       no\n"));
    }

    #[test]
    fn test_report_json() {
        let report = RunReport {
            summary: RunSummary::default(),
            board: Board::from_ascii("..\n#.\n").unwrap(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["board"], serde_json::json!(["..", "#."]));
        assert_eq!(json["summary"]["topped_out"], serde_json::json!(false));
    }
}
