//! Domain similarity CLI
//!
//! Usage:
//!   domsim analyze <INPUT> [-o DIR] [--threshold N] [--candidate-limit K] [--threads N]
//!   domsim pairs <INPUT> [-o DIR] [--threads N]
//!   domsim groups <INPUT> [-o DIR] [--threshold N] [--candidate-limit K]
//!
//! Log verbosity follows `RUST_LOG` (default: info).

mod commands;
mod terminal;

use commands::{CommandLine, Commands, analyze, configure_threads, groups, pairs};
use terminal::logging;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    match commands.command {
        Commands::Analyze {
            io,
            grouping,
            threads,
        } => {
            configure_threads(threads)?;
            analyze::analyze(&io, &grouping)
        }
        Commands::Pairs { io, threads } => {
            configure_threads(threads)?;
            pairs::pairs(&io)
        }
        Commands::Groups { io, grouping } => groups::groups(&io, &grouping),
    }
}
