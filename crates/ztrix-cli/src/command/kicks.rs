use std::path::PathBuf;

use ztrix_engine::PieceKind;

use crate::{schema::report::KickTable, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub struct KicksArg {
    /// Piece kind to print (all kinds when omitted)
    #[arg(long, value_parser = parse_piece_kind)]
    kind: Option<PieceKind>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &KicksArg) -> anyhow::Result<()> {
    let tables = match arg.kind {
        Some(kind) => vec![KickTable::new(kind)],
        None => PieceKind::ALL.into_iter().map(KickTable::new).collect(),
    };
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_json(&tables)?;
    Ok(())
}

fn parse_piece_kind(s: &str) -> Result<PieceKind, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_char(c.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown piece kind '{s}', expected one of IOSZJLT")),
        _ => Err(format!("piece kind must be a single letter, got '{s}'")),
    }
}
