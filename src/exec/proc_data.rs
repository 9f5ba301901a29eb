// src/exec/proc_data.rs

//! Result of a finished command.

use std::borrow::Cow;
use std::fmt;

/// Captured output, decoded or raw depending on `decode_output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedOutput {
    Text(String),
    Bytes(Vec<u8>),
}

impl CapturedOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            CapturedOutput::Text(s) => s.is_empty(),
            CapturedOutput::Bytes(b) => b.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CapturedOutput::Text(s) => Some(s),
            CapturedOutput::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            CapturedOutput::Text(s) => s.as_bytes(),
            CapturedOutput::Bytes(b) => b,
        }
    }
}

impl fmt::Display for CapturedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedOutput::Text(s) => f.write_str(s),
            CapturedOutput::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// Data returned from a command: exit code plus whatever was captured.
///
/// Output is stored as raw bytes and decoded on access when `decode_output`
/// is set. Decoding is UTF-8; invalid sequences become U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcData {
    pub retcode: i32,
    pub decode_output: bool,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
}

impl ProcData {
    pub(crate) fn new(retcode: i32, stdout: Vec<u8>, stderr: Vec<u8>, decode_output: bool) -> Self {
        Self {
            retcode,
            decode_output,
            stdout,
            stderr,
        }
    }

    pub fn success(&self) -> bool {
        self.retcode == 0
    }

    /// Captured stdout (or the combined stream in `Combined` mode).
    pub fn stdout(&self) -> CapturedOutput {
        self.render(&self.stdout)
    }

    pub fn stderr(&self) -> CapturedOutput {
        self.render(&self.stderr)
    }

    pub fn stdout_bytes(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr_bytes(&self) -> &[u8] {
        &self.stderr
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    fn render(&self, raw: &[u8]) -> CapturedOutput {
        if self.decode_output {
            CapturedOutput::Text(String::from_utf8_lossy(raw).into_owned())
        } else {
            CapturedOutput::Bytes(raw.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_flag_selects_text_or_bytes() {
        let text = ProcData::new(0, b"hi\n".to_vec(), Vec::new(), true);
        assert_eq!(text.stdout(), CapturedOutput::Text("hi\n".to_string()));
        assert!(text.stderr().is_empty());

        let raw = ProcData::new(0, b"hi\n".to_vec(), Vec::new(), false);
        assert_eq!(raw.stdout(), CapturedOutput::Bytes(b"hi\n".to_vec()));
        assert_eq!(raw.stdout().as_text(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let data = ProcData::new(0, vec![b'a', 0xff, b'b'], Vec::new(), true);
        assert_eq!(data.stdout().as_text(), Some("a\u{fffd}b"));
    }
}
