//! Entry point for the `easy-debian` binary.
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use easy_debian::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let color = logging::color_enabled(args.no_color);

    match args.command_or_default() {
        cli::Command::Provision(opts) => {
            logging::init_subscriber(args.verbose, color, "provision");
            let log = Arc::new(logging::Logger::new("provision", color));
            commands::provision::run(&args.global, &opts, &log)
        }
        cli::Command::Detect => {
            logging::init_subscriber(args.verbose, color, "detect");
            let log = logging::Logger::new("detect", color);
            commands::detect::run(&args.global, &log)
        }
        cli::Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut cli::Cli::command(),
                "easy-debian",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        #[allow(clippy::print_stdout)]
        cli::Command::Version => {
            let version = option_env!("EASY_DEBIAN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("easy-debian {version}");
            Ok(())
        }
    }
}
