use clap::{Parser, Subcommand};

use crate::logging;

use self::{kicks::KicksArg, replay::ReplayArg, simulate::SimulateArg};

mod kicks;
mod replay;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Replay a scripted sequence of pieces and actions
    Replay(#[clap(flatten)] ReplayArg),
    /// Drop randomly chosen pieces with random moves
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the kick offsets of the piece catalog
    Kicks(#[clap(flatten)] KicksArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose)?;
    match args.mode {
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Kicks(arg) => kicks::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let args = CommandArgs::try_parse_from(["ztrix", "kicks", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Kicks(_)));
    }
}
