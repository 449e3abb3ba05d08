mod check;
mod dump;
mod report;

pub use check::*;
pub use dump::*;
pub use report::*;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate the environment and exit
    Check,

    /// Print resolved configuration
    Dump {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check => check(),
        ConfigCmd::Dump { json } => dump(json),
    }
}
