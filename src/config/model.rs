// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::exec::{CaptureMode, ExecOptions};

/// Manifest as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// max_workers = 4
/// capture = "combined"
///
/// [[command]]
/// args = ["cargo", "fmt", "--check"]
///
/// [[command]]
/// args = ["sh", "-c", "exit 3"]
/// ignore_retcode = true
/// ```
///
/// `[config]` is optional; every field has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub command: Vec<CommandEntry>,
}

/// `[config]` section: defaults applied to every command.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Pool size; `0` or absent picks a host-dependent default.
    #[serde(default)]
    pub max_workers: Option<i64>,

    #[serde(default = "default_decode_output")]
    pub decode_output: bool,

    #[serde(default)]
    pub ignore_retcode: bool,

    #[serde(default)]
    pub capture: CaptureMode,
}

fn default_decode_output() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            max_workers: None,
            decode_output: default_decode_output(),
            ignore_retcode: false,
            capture: CaptureMode::default(),
        }
    }
}

/// One `[[command]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandEntry {
    /// Program followed by its arguments.
    pub args: Vec<String>,

    /// Working directory; relative paths are resolved against the manifest's
    /// directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Text written to the command's stdin.
    #[serde(default)]
    pub input: Option<String>,

    /// Overrides `[config].ignore_retcode`.
    #[serde(default)]
    pub ignore_retcode: Option<bool>,

    /// Overrides `[config].capture`.
    #[serde(default)]
    pub capture: Option<CaptureMode>,
}

/// A validated manifest.
///
/// Only constructible through `TryFrom<RawManifest>` (see `validate.rs`), so
/// holding one means every command has a program and the worker count is
/// not negative.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub config: ConfigSection,
    pub command: Vec<CommandEntry>,
}

impl Manifest {
    pub(crate) fn new_unchecked(config: ConfigSection, command: Vec<CommandEntry>) -> Self {
        Self { config, command }
    }

    /// Build the executor options for every command, in manifest order.
    pub fn exec_options(&self, root: &Path) -> Vec<ExecOptions> {
        self.command
            .iter()
            .map(|entry| self.options_for(entry, root))
            .collect()
    }

    fn options_for(&self, entry: &CommandEntry, root: &Path) -> ExecOptions {
        let mut opts = ExecOptions::new(entry.args.iter().cloned())
            .capture(entry.capture.unwrap_or(self.config.capture))
            .ignore_retcode(entry.ignore_retcode.unwrap_or(self.config.ignore_retcode))
            .decode_output(self.config.decode_output);

        if let Some(cwd) = &entry.cwd {
            opts = opts.cwd(root.join(cwd));
        }
        if let Some(input) = &entry.input {
            opts = opts.input(input.as_bytes());
        }
        opts
    }
}
