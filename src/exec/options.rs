// src/exec/options.rs

//! Inputs for a single command invocation.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, PipeReader};
use std::path::PathBuf;
use std::process::Stdio;

use clap::ValueEnum;
use serde::Deserialize;

/// Which of the child's output streams are collected.
///
/// - `Combined`: stdout and stderr share one pipe, so
///   [`ProcData::stdout`](crate::exec::ProcData::stdout) holds both in the
///   order the child wrote them. `stderr` stays empty.
/// - `Separate`: stdout and stderr are collected into their own buffers
///   (default).
/// - `Discard`: both streams go to the null device and nothing is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Combined,
    #[default]
    Separate,
    Discard,
}

impl CaptureMode {
    /// Fresh stdout/stderr wiring for one spawn.
    ///
    /// `Combined` points both streams at the write end of a single pipe, so
    /// the reader sees bytes in the order the child wrote them.
    pub(crate) fn output_pipes(self) -> io::Result<OutputPipes> {
        Ok(match self {
            CaptureMode::Discard => OutputPipes {
                stdout: Stdio::null(),
                stderr: Stdio::null(),
                merged: None,
            },
            CaptureMode::Separate => OutputPipes {
                stdout: Stdio::piped(),
                stderr: Stdio::piped(),
                merged: None,
            },
            CaptureMode::Combined => {
                let (reader, writer) = io::pipe()?;
                OutputPipes {
                    stdout: Stdio::from(writer.try_clone()?),
                    stderr: Stdio::from(writer),
                    merged: Some(reader),
                }
            }
        })
    }
}

/// Child stdout/stderr configuration plus the parent's end of the merged
/// pipe, if any.
///
/// The write ends live inside the `Command` once configured; the command
/// must be dropped after spawning or the merged reader never sees EOF.
pub(crate) struct OutputPipes {
    pub(crate) stdout: Stdio,
    pub(crate) stderr: Stdio,
    pub(crate) merged: Option<PipeReader>,
}

/// Label attached to each captured line in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamClass {
    /// Combined stdout/stderr.
    Output,
    Stdout,
    Stderr,
}

impl fmt::Display for StreamClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamClass::Output => "OUTPUT",
            StreamClass::Stdout => "STDOUT",
            StreamClass::Stderr => "STDERR",
        };
        f.write_str(s)
    }
}

/// Everything needed to run one command.
///
/// Built with [`ExecOptions::new`] and the chained setters:
///
/// ```no_run
/// use xjfx::exec::{exec_cmd, CaptureMode, ExecOptions};
///
/// let opts = ExecOptions::new(["git", "status", "--short"])
///     .capture(CaptureMode::Combined)
///     .cwd("/tmp")
///     .ignore_retcode(true);
/// let data = exec_cmd(&opts)?;
/// println!("{}", data.stdout());
/// # Ok::<(), xjfx::errors::ExecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Program followed by its arguments.
    pub args: Vec<String>,
    /// Bytes written to the child's stdin. `None` inherits the parent's stdin.
    pub input: Option<Vec<u8>>,
    pub capture: CaptureMode,
    pub cwd: Option<PathBuf>,
    /// Added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    pub ignore_retcode: bool,
    pub decode_output: bool,
}

impl ExecOptions {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            input: None,
            capture: CaptureMode::default(),
            cwd: None,
            env: BTreeMap::new(),
            ignore_retcode: false,
            decode_output: true,
        }
    }

    pub fn input(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn capture(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn ignore_retcode(mut self, ignore: bool) -> Self {
        self.ignore_retcode = ignore;
        self
    }

    pub fn decode_output(mut self, decode: bool) -> Self {
        self.decode_output = decode;
        self
    }

    /// Shell-quoted rendering of `args`, used in logs and error messages.
    pub fn command_line(&self) -> String {
        join_args(&self.args)
    }

    pub(crate) fn stdin(&self) -> Stdio {
        if self.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        }
    }
}

/// Join arguments into a single string a POSIX shell would split back into
/// the same words.
pub fn join_args(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_args_quotes_only_when_needed() {
        let args: Vec<String> = ["echo", "hello world", "", "it's", "a=b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            join_args(&args),
            r#"echo 'hello world' '' 'it'"'"'s' a=b"#
        );
    }

    #[test]
    fn only_combined_mode_opens_a_merged_pipe() {
        assert!(CaptureMode::Combined.output_pipes().unwrap().merged.is_some());
        assert!(CaptureMode::Separate.output_pipes().unwrap().merged.is_none());
        assert!(CaptureMode::Discard.output_pipes().unwrap().merged.is_none());
    }

    #[test]
    fn defaults_decode_and_fail_on_nonzero() {
        let opts = ExecOptions::new(["true"]);
        assert!(opts.decode_output);
        assert!(!opts.ignore_retcode);
        assert_eq!(opts.capture, CaptureMode::Separate);
        assert!(opts.input.is_none());
    }
}
