use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

const DEFAULT_OUTPUT_DIR: &str = "cdk.out";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the logs infrastructure workspace",
    long_about = "A unified CLI for synthesizing the log catalog stack\n\
                  and running CI checks in this workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the stack template; extra flags go to the synth app
    Synth {
        /// Flags forwarded to `logs_infra_synth synth`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run CI checks (fmt, clippy, tests, synth smoke run)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Check,
    /// Unit and integration tests
    Test,
    /// Validate and synthesize the reference stack
    Synth,
    /// Run check + test + synth
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn synth_cargo_args(args: &[String]) -> Vec<&str> {
    let mut cargo_args = vec!["run", "-p", "logs_infra_synth", "--", "synth"];
    cargo_args.extend(args.iter().map(String::as_str));
    if !args.iter().any(|arg| arg.starts_with("--output-dir")) {
        cargo_args.extend(["--output-dir", DEFAULT_OUTPUT_DIR]);
    }
    cargo_args
}

fn synth(args: &[String]) {
    run_cargo(&synth_cargo_args(args));
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test logs_infra_core");
    run_cargo(&["test", "-p", "logs_infra_core"]);

    step("Test logs_infra_synth");
    run_cargo(&["test", "-p", "logs_infra_synth"]);
}

fn ci_synth() {
    step("Validate reference stack");
    run_cargo(&["run", "-p", "logs_infra_synth", "--", "validate"]);

    step("Synthesize reference stack");
    synth(&[
        "--environment".to_string(),
        "development".to_string(),
        "--output-dir".to_string(),
        "target/cdk.out".to_string(),
    ]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth { args } => {
            step("Synthesize stack");
            synth(&args);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Test => ci_test(),
                CiJob::Synth => ci_synth(),
                CiJob::All => {
                    ci_check();
                    ci_test();
                    ci_synth();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synth_forwards_every_flag_to_the_app() {
        let cli = Cli::try_parse_from([
            "xtask",
            "synth",
            "--environment",
            "production",
            "--retention-days",
            "30",
            "--account-id",
            "123456789012",
            "--stack-id",
            "LogsProd",
        ])
        .expect("flags should parse");
        let Commands::Synth { args } = cli.command else {
            panic!("expected synth command");
        };

        assert_eq!(
            synth_cargo_args(&args),
            vec![
                "run",
                "-p",
                "logs_infra_synth",
                "--",
                "synth",
                "--environment",
                "production",
                "--retention-days",
                "30",
                "--account-id",
                "123456789012",
                "--stack-id",
                "LogsProd",
                "--output-dir",
                "cdk.out",
            ]
        );
    }

    #[test]
    fn explicit_output_dir_is_not_duplicated() {
        let args = vec!["--output-dir=out".to_string()];
        assert_eq!(
            synth_cargo_args(&args),
            vec!["run", "-p", "logs_infra_synth", "--", "synth", "--output-dir=out"]
        );
    }
}
