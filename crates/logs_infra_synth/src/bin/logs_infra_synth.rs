use std::io;

use anyhow::Result;
use clap::Parser;
use logs_infra_synth::cli::{Cli, Commands};
use logs_infra_synth::commands::{run_synth, run_validate};
use logs_infra_synth::logging::init_tracing;
use logs_infra_synth::settings::resolve_config;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Synth { config, output_dir } => {
            let config = resolve_config(&config)?;
            run_synth(&config, output_dir.as_deref(), &mut stdout)
        }
        Commands::Validate { config } => {
            let config = resolve_config(&config)?;
            run_validate(&config, &mut stdout)
        }
    }
}
