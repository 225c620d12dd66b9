//! gosentry - Go source lint

use anyhow::Result;
use clap::Parser;
use gosentry_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { ref path }) => {
            commands::init::run(path.as_deref())?;
        }
        None => {
            commands::scan::run(cli.directory.as_deref(), &cli)?;
        }
    }

    Ok(())
}
