// src/exec/report.rs

//! Logging and exit-status handling shared by the blocking and async
//! executors.

use std::process::ExitStatus;

use tracing::{debug, error, Level};

use crate::errors::ExecError;
use crate::exec::{ExecOptions, ProcData, StreamClass};

pub(crate) fn log_start(opts: &ExecOptions) {
    debug!(
        command = %opts.command_line(),
        cwd = ?opts.cwd,
        capture = ?opts.capture,
        "executing"
    );
}

/// Log one captured line at debug level, tagged with its stream.
pub(crate) fn log_line(class: StreamClass, raw_line: &[u8]) {
    let line = String::from_utf8_lossy(raw_line);
    debug!(stream = %class, "{}", line.trim_end());
}

/// Exit code of a finished child; `-1` when it was killed by a signal.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Turn a collected `ProcData` into the call's final result.
///
/// A non-zero exit is an error unless `ignore_retcode` is set. The output is
/// logged with the error unless the debug level is active, in which case each
/// line has already been logged as it arrived.
pub(crate) fn finish(opts: &ExecOptions, data: ProcData) -> Result<ProcData, ExecError> {
    debug!(command = %opts.command_line(), retcode = data.retcode, "command exited");

    if data.success() || opts.ignore_retcode {
        return Ok(data);
    }

    let command = opts.command_line();
    error!("`{}` returned: {}", command, data.retcode);
    if !tracing::enabled!(Level::DEBUG) {
        if !data.stdout_bytes().is_empty() {
            error!("{}", data.stdout_lossy());
        }
        if !data.stderr_bytes().is_empty() {
            error!("{}", data.stderr_lossy());
        }
    }

    Err(ExecError::NonZeroExit {
        command,
        retcode: data.retcode,
        output: data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_retcode_turns_failure_into_data() {
        let opts = ExecOptions::new(["false"]).ignore_retcode(true);
        let data = ProcData::new(3, Vec::new(), b"boom".to_vec(), true);
        let data = finish(&opts, data).expect("ignored retcode should not fail");
        assert_eq!(data.retcode, 3);
    }

    #[test]
    fn nonzero_exit_carries_code_and_output() {
        let opts = ExecOptions::new(["false"]);
        let data = ProcData::new(2, b"out".to_vec(), b"err".to_vec(), true);
        match finish(&opts, data) {
            Err(ExecError::NonZeroExit {
                command,
                retcode,
                output,
            }) => {
                assert_eq!(command, "false");
                assert_eq!(retcode, 2);
                assert_eq!(output.stdout_bytes(), b"out");
                assert_eq!(output.stderr_bytes(), b"err");
            }
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }
}
