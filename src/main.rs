mod cli;

use anyhow::Result;
use clap::Parser;

use cli::dispatch::dispatch;
use cli::types::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    vmgate::logging::init_logging(cli.verbose)?;
    dispatch(cli.command)
}
