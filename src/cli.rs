// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::exec::CaptureMode;
use crate::logging::LogLevel;

/// Command-line arguments for `xjfx`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xjfx",
    version,
    about = "Run commands with captured output, one at a time or as a parallel batch.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XJFX_LOG` or a default level will be used. At `debug`,
    /// every captured output line is logged as it arrives.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a single command and relay its output and exit code.
    Run(RunArgs),

    /// Run every command of a TOML manifest on a worker pool.
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Which output streams to capture.
    #[arg(long, value_enum, default_value_t = CaptureMode::Separate)]
    pub capture: CaptureMode,

    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Report a non-zero exit status instead of treating it as an error.
    #[arg(long)]
    pub ignore_retcode: bool,

    /// Relay captured bytes as is instead of decoding them as text.
    #[arg(long)]
    pub raw: bool,

    /// Forward this process's stdin to the command.
    #[arg(long)]
    pub stdin: bool,

    /// Program and arguments, e.g. `xjfx run -- ls -la`.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Path to the manifest (TOML).
    #[arg(long, value_name = "PATH", default_value = "Xjfx.toml")]
    pub config: PathBuf,

    /// Override `[config].max_workers`. `0` picks a host default.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_workers: Option<i64>,

    /// Parse + validate, print the commands, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_keeps_hyphenated_command_args() {
        let args = CliArgs::try_parse_from(["xjfx", "run", "--capture", "combined", "--", "ls", "-la"])
            .unwrap();
        match args.command {
            CliCommand::Run(run) => {
                assert_eq!(run.capture, CaptureMode::Combined);
                assert_eq!(run.args, vec!["ls", "-la"]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn batch_defaults() {
        let args = CliArgs::try_parse_from(["xjfx", "batch", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        match args.command {
            CliCommand::Batch(batch) => {
                assert_eq!(batch.config, PathBuf::from("Xjfx.toml"));
                assert_eq!(batch.max_workers, None);
                assert!(!batch.dry_run);
            }
            other => panic!("expected batch, got {:?}", other),
        }
    }

    #[test]
    fn run_requires_a_command() {
        assert!(CliArgs::try_parse_from(["xjfx", "run"]).is_err());
    }
}
