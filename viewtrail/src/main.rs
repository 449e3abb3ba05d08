use clap::{Parser, Subcommand};
use viewtrail_core::cli;
use viewtrail_core::conf::{Config, load_config};
use viewtrail_core::logging::init_logging;
use viewtrail_core::server;

#[derive(Parser, Debug)]
#[command(
    name = "viewtrail",
    version,
    about = "viewtrail: request logging and view analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the viewtrail server (default)
    Run,

    /// Inspect the environment configuration
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    // A missing .env file is fine, the process environment still applies.
    let _ = dotenvy::dotenv();

    match cli.command {
        Some(Command::Config { cmd }) => {
            if let Err(e) = cli::config::run(cmd) {
                eprintln!("config error: {e}");
                std::process::exit(1);
            }
        }

        Some(Command::Run) | None => {
            let config = load_or_exit();

            if let Err(e) = server::run(config) {
                eprintln!("failed to start viewtrail: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn load_or_exit() -> Config {
    match load_config() {
        Ok(validated) => {
            init_logging(validated.config.log_level);
            validated.log_warnings();
            validated.config
        }
        Err(err) => {
            cli::config::report_config_error(&err);
            std::process::exit(1);
        }
    }
}
