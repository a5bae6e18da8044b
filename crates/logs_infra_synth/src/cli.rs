use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "logs_infra_synth",
    about = "Synthesize the access log bucket and catalog stack",
    long_about = "Builds the bucket, catalog database and partition-projected table\n\
                  descriptors and renders them as a provisioning template."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the rendered template to a file or stdout
    Synth {
        #[command(flatten)]
        config: ConfigArgs,
        /// Directory that receives `<stack-id>.template.json`; stdout when omitted
        #[arg(long, env = "LOGS_INFRA_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Build the descriptor set and report whether it is valid
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Overrides applied on top of defaults and the optional config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file with `stackId`, `environment`, `retentionDays`, `accountId`
    #[arg(long, env = "LOGS_INFRA_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, env = "LOGS_INFRA_STACK_ID")]
    pub stack_id: Option<String>,
    /// Environment label used in bucket and database names
    #[arg(long, env = "LOGS_INFRA_ENVIRONMENT")]
    pub environment: Option<String>,
    /// Days before log objects expire
    #[arg(long, env = "LOGS_INFRA_RETENTION_DAYS", allow_negative_numbers = true)]
    pub retention_days: Option<i64>,
    /// Catalog owner; the deploying account when omitted
    #[arg(long, env = "LOGS_INFRA_ACCOUNT_ID")]
    pub account_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_synth_flags() {
        let cli = Cli::try_parse_from([
            "logs_infra_synth",
            "synth",
            "--environment",
            "staging",
            "--retention-days",
            "30",
            "--output-dir",
            "cdk.out",
        ])
        .expect("flags should parse");

        let Commands::Synth { config, output_dir } = cli.command else {
            panic!("expected synth command");
        };
        assert_eq!(config.environment.as_deref(), Some("staging"));
        assert_eq!(config.retention_days, Some(30));
        assert_eq!(output_dir, Some(PathBuf::from("cdk.out")));
    }
}
