// src/lib.rs

//! Small helpers around process execution and thread pools:
//!
//! - [`exec`]: run a command, feed it input, capture its output.
//! - [`pool`]: apply a function to many inputs on a bounded thread pool,
//!   results in input order.
//! - [`grouper`]: split a sequence into fixed-size blocks.
//! - [`prompt`]: yes/no questions on the terminal.
//! - [`logging`]: explicit, idempotent `tracing` setup.
//!
//! The `xjfx` binary ([`run`]) wires `exec` and `pool` to a CLI and a TOML
//! batch manifest ([`config`]).

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod grouper;
pub mod logging;
pub mod pool;
pub mod prompt;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::{BatchArgs, CliArgs, CliCommand, RunArgs};
use crate::config::{load_and_validate, Manifest};
use crate::errors::ExecError;
use crate::exec::{exec_cmd, exec_cmd_async, ExecOptions, ProcData};
use crate::pool::try_thr_exec;

/// High-level entry point used by `main.rs`.
///
/// Returns the exit code the process should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    match args.command {
        CliCommand::Run(run) => run_single(run).await,
        CliCommand::Batch(batch) => tokio::task::spawn_blocking(move || run_batch(batch))
            .await
            .context("batch worker thread failed")?,
    }
}

/// `xjfx run`: relay the command's output and exit code.
async fn run_single(args: RunArgs) -> Result<i32> {
    let mut opts = ExecOptions::new(args.args)
        .capture(args.capture)
        .ignore_retcode(args.ignore_retcode)
        .decode_output(!args.raw);
    if let Some(cwd) = args.cwd {
        opts = opts.cwd(cwd);
    }
    if args.stdin {
        let mut input = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut input)
            .await
            .context("reading stdin")?;
        opts = opts.input(input);
    }

    match exec_cmd_async(&opts).await {
        Ok(data) => {
            relay_output(&data)?;
            Ok(data.retcode)
        }
        // Already logged by the executor; still hand the output through.
        Err(ExecError::NonZeroExit {
            retcode, output, ..
        }) => {
            relay_output(&output)?;
            Ok(retcode)
        }
        Err(err) => Err(err.into()),
    }
}

fn relay_output(data: &ProcData) -> Result<()> {
    std::io::stdout().write_all(data.stdout().as_bytes())?;
    std::io::stderr().write_all(data.stderr().as_bytes())?;
    Ok(())
}

/// `xjfx batch`: run every manifest command on the worker pool and print one
/// summary line per command, in manifest order.
fn run_batch(args: BatchArgs) -> Result<i32> {
    let manifest = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&manifest);
        return Ok(0);
    }

    let root = manifest_root_dir(&args.config);
    let jobs = manifest.exec_options(&root);
    let labels: Vec<String> = jobs.iter().map(ExecOptions::command_line).collect();
    let max_workers = args.max_workers.or(manifest.config.max_workers);

    info!(commands = jobs.len(), ?max_workers, "running batch");
    let results = try_thr_exec(|opts: ExecOptions| exec_cmd(&opts), jobs, max_workers)?;

    let mut failed = 0usize;
    for (label, res) in labels.iter().zip(&results) {
        match res {
            Ok(data) => println!("[ok]   {:>4}  {label}", data.retcode),
            Err(ExecError::NonZeroExit { retcode, .. }) => {
                failed += 1;
                println!("[FAIL] {retcode:>4}  {label}");
            }
            Err(err) => {
                failed += 1;
                println!("[ERR]     -  {label}: {err}");
            }
        }
    }

    info!(total = results.len(), failed, "batch complete");
    Ok(if failed == 0 { 0 } else { 1 })
}

/// Directory relative `cwd` entries are resolved against.
///
/// - If the manifest path has a non-empty parent (e.g. "ci/Xjfx.toml"),
///   that directory is used.
/// - If it's a bare filename like "Xjfx.toml" (parent = ""), fall back to
///   the current working directory.
fn manifest_root_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print config and commands.
fn print_dry_run(manifest: &Manifest) {
    println!("xjfx dry-run");
    println!("  config.max_workers = {:?}", manifest.config.max_workers);
    println!("  config.capture = {:?}", manifest.config.capture);
    println!("  config.ignore_retcode = {}", manifest.config.ignore_retcode);
    println!("  config.decode_output = {}", manifest.config.decode_output);
    println!();

    println!("commands ({}):", manifest.command.len());
    for entry in &manifest.command {
        println!("  - {}", exec::join_args(&entry.args));
        if let Some(ref cwd) = entry.cwd {
            println!("      cwd: {}", cwd.display());
        }
        if let Some(ref input) = entry.input {
            println!("      input: {} bytes", input.len());
        }
        if let Some(ignore) = entry.ignore_retcode {
            println!("      ignore_retcode: {ignore}");
        }
        if let Some(capture) = entry.capture {
            println!("      capture: {capture:?}");
        }
    }

    debug!("dry-run complete (no execution)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_manifest_name_resolves_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(manifest_root_dir(Path::new("Xjfx.toml")), cwd);
        assert_eq!(
            manifest_root_dir(Path::new("ci/Xjfx.toml")),
            PathBuf::from("ci")
        );
    }
}
