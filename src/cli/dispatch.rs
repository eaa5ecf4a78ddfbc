use anyhow::Result;
use vmgate::commands::{gate, tasks};
use vmgate::gate::GateOptions;

use super::types::Commands;

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Gate { strict_mode, suite } => {
            let overrides = suite.overrides();
            let options = GateOptions {
                strict_mode,
                selection: suite.tags,
            };
            gate::execute(suite.config, overrides, options)
        }
        Commands::Tasks { suite } => {
            let overrides = suite.overrides();
            tasks::list(suite.config, overrides, suite.tags)
        }
    }
}
