use std::path::PathBuf;

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use ztrix_engine::{Board, PieceKind, Point, Rotation};

use crate::{
    driver::Driver,
    schema::{report::RunReport, script::Action},
    util::{Output, OutputFormat},
};

#[derive(Debug, Clone, clap::Args)]
pub struct SimulateArg {
    /// Seed for the piece and move generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of pieces to drop
    #[arg(long, default_value_t = 100)]
    pieces: usize,
    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: i32,
    /// Board height in cells
    #[arg(long, default_value_t = 20)]
    height: i32,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Simulating up to {} pieces with seed {seed}", arg.pieces);

    let mut rng = Pcg32::seed_from_u64(seed);
    let report = simulate(&mut rng, arg.pieces, Point::new(arg.width, arg.height))?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_as(&report, arg.format)?;
    Ok(())
}

fn simulate<R>(rng: &mut R, pieces: usize, size: Point) -> anyhow::Result<RunReport>
where
    R: Rng + ?Sized,
{
    let board = Board::new(size).context("Invalid board size")?;
    let spawn = Point::new(size.x / 2 - 1, size.y - 2);
    let mut driver = Driver::new(board);
    for _ in 0..pieces {
        let kind: PieceKind = rng.random();
        let actions = random_actions(rng, size.x);
        if !driver.play_piece(kind, spawn, Rotation::R0, actions)? {
            break;
        }
    }
    Ok(driver.finish())
}

/// One optional rotation, then a horizontal shift of up to half the width.
fn random_actions<R>(rng: &mut R, width: i32) -> Vec<Action>
where
    R: Rng + ?Sized,
{
    let mut actions = Vec::new();
    match rng.random_range(0..4) {
        1 => actions.push(Action::RotateCw),
        2 => actions.push(Action::Rotate180),
        3 => actions.push(Action::RotateCcw),
        _ => {}
    }
    let reach = width / 2;
    let shift = rng.random_range(-reach..=reach);
    let step = if shift < 0 { Action::Left } else { Action::Right };
    actions.extend(std::iter::repeat_n(step, shift.unsigned_abs() as usize));
    actions.push(Action::Place);
    actions
}
