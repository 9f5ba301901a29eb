#![allow(dead_code)]

use std::path::PathBuf;

use xjfx::config::{CommandEntry, ConfigSection, Manifest, RawManifest};
use xjfx::exec::CaptureMode;

/// Builder for `Manifest` to simplify test setup.
pub struct ManifestBuilder {
    manifest: RawManifest,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: RawManifest {
                config: ConfigSection::default(),
                command: Vec::new(),
            },
        }
    }

    pub fn with_command(mut self, entry: CommandEntry) -> Self {
        self.manifest.command.push(entry);
        self
    }

    pub fn with_max_workers(mut self, n: i64) -> Self {
        self.manifest.config.max_workers = Some(n);
        self
    }

    pub fn with_capture(mut self, capture: CaptureMode) -> Self {
        self.manifest.config.capture = capture;
        self
    }

    pub fn with_ignore_retcode(mut self, val: bool) -> Self {
        self.manifest.config.ignore_retcode = val;
        self
    }

    pub fn with_decode_output(mut self, val: bool) -> Self {
        self.manifest.config.decode_output = val;
        self
    }

    pub fn raw(self) -> RawManifest {
        self.manifest
    }

    pub fn build(self) -> Manifest {
        Manifest::try_from(self.manifest).expect("Failed to build valid manifest from builder")
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CommandEntry`.
pub struct CommandEntryBuilder {
    entry: CommandEntry,
}

impl CommandEntryBuilder {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entry: CommandEntry {
                args: args.into_iter().map(Into::into).collect(),
                cwd: None,
                input: None,
                ignore_retcode: None,
                capture: None,
            },
        }
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entry.cwd = Some(dir.into());
        self
    }

    pub fn input(mut self, text: &str) -> Self {
        self.entry.input = Some(text.to_string());
        self
    }

    pub fn ignore_retcode(mut self, val: bool) -> Self {
        self.entry.ignore_retcode = Some(val);
        self
    }

    pub fn capture(mut self, capture: CaptureMode) -> Self {
        self.entry.capture = Some(capture);
        self
    }

    pub fn build(self) -> CommandEntry {
        self.entry
    }
}
