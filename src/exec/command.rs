// src/exec/command.rs

//! Blocking command execution on top of `std::process`.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ScopedJoinHandle};

use crate::errors::ExecError;
use crate::exec::report::{exit_code, finish, log_line, log_start};
use crate::exec::{ExecOptions, ProcData, StreamClass};

/// Run a command to completion and collect its output.
///
/// The calling thread blocks until the child exits; there is no timeout.
/// While it waits, helper threads feed `input` to the child's stdin and drain
/// whichever pipes the capture mode asked for, so a chatty child cannot
/// deadlock on a full pipe.
///
/// Fails with:
/// - [`ExecError::EmptyCommand`] if `args` is empty (nothing is spawned),
/// - [`ExecError::Spawn`] if the program cannot be started,
/// - [`ExecError::NonZeroExit`] if it exits non-zero and `ignore_retcode` is
///   not set,
/// - [`ExecError::Io`] if talking to the child's pipes fails.
pub fn exec_cmd(opts: &ExecOptions) -> Result<ProcData, ExecError> {
    let (program, rest) = opts.args.split_first().ok_or(ExecError::EmptyCommand)?;
    log_start(opts);

    let io_err = |source: io::Error| ExecError::Io {
        command: opts.command_line(),
        source,
    };

    let pipes = opts.capture.output_pipes().map_err(io_err)?;
    let mut cmd = Command::new(program);
    cmd.args(rest)
        .envs(&opts.env)
        .stdin(opts.stdin())
        .stdout(pipes.stdout)
        .stderr(pipes.stderr);
    if let Some(cwd) = &opts.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        program: program.clone(),
        source,
    })?;
    // Releases our copies of the merged pipe's write end.
    drop(cmd);

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let merged = pipes.merged;

    let out_buf = Mutex::new(Vec::new());
    let err_buf = Mutex::new(Vec::new());
    let out_sink = &out_buf;
    let err_sink = &err_buf;

    let status = thread::scope(|s| {
        let feeder = match (stdin, opts.input.as_deref()) {
            (Some(pipe), Some(input)) => Some(s.spawn(move || feed_stdin(pipe, input))),
            _ => None,
        };
        let out_reader =
            stdout.map(|pipe| s.spawn(move || pump(pipe, StreamClass::Stdout, out_sink)));
        let err_reader =
            stderr.map(|pipe| s.spawn(move || pump(pipe, StreamClass::Stderr, err_sink)));
        let merged_reader =
            merged.map(|pipe| s.spawn(move || pump(pipe, StreamClass::Output, out_sink)));

        let workers = [feeder, out_reader, err_reader, merged_reader];
        settle(&mut child, workers.into_iter().flatten())
    })
    .map_err(io_err)?;

    let data = ProcData::new(
        exit_code(status),
        out_buf.into_inner().unwrap_or_else(PoisonError::into_inner),
        err_buf.into_inner().unwrap_or_else(PoisonError::into_inner),
        opts.decode_output,
    );
    finish(opts, data)
}

/// Write all input, then drop the pipe so the child sees EOF.
///
/// A child that exits without reading its stdin is not an error.
fn feed_stdin(mut pipe: ChildStdin, input: &[u8]) -> io::Result<()> {
    match pipe.write_all(input).and_then(|_| pipe.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Read `stream` line by line into `sink`, logging each line.
pub(crate) fn pump<R: Read>(
    stream: R,
    class: StreamClass,
    sink: &Mutex<Vec<u8>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        log_line(class, &line);
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(&line);
    }
}

/// Join the stdin/pipe workers, then reap the child.
///
/// On the first worker failure the child is killed, so the remaining readers
/// hit EOF instead of waiting on a process nobody will talk to again. The
/// child is waited on in every case.
fn settle<'s>(
    child: &mut Child,
    workers: impl IntoIterator<Item = ScopedJoinHandle<'s, io::Result<()>>>,
) -> io::Result<ExitStatus> {
    let mut outcome = Ok(());
    for handle in workers {
        let res = join(handle);
        if outcome.is_ok() && res.is_err() {
            let _ = child.kill();
            outcome = res;
        }
    }
    let status = child.wait();
    outcome.and(status)
}

fn join(handle: ScopedJoinHandle<'_, io::Result<()>>) -> io::Result<()> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe worker thread panicked")))
}
