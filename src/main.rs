//! Spritegrid - command-line shell for editing pixel-grid sprite animations

use std::process::ExitCode;

use spritegrid::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
