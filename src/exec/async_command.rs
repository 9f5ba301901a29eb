// src/exec/async_command.rs

//! Async flavour of [`exec_cmd`](crate::exec::exec_cmd) built on
//! `tokio::process`.

use std::io;
use std::sync::{Mutex, PoisonError};

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};
use tokio::task::{self, JoinHandle};

use crate::errors::ExecError;
use crate::exec::report::{exit_code, finish, log_line, log_start};
use crate::exec::{command, ExecOptions, ProcData, StreamClass};

/// Same contract as [`exec_cmd`](crate::exec::exec_cmd), for callers that
/// are already running inside a Tokio runtime.
///
/// Feeding stdin and draining both pipes happen concurrently on the calling
/// task. If the returned future is dropped before completion, the child is
/// killed.
pub async fn exec_cmd_async(opts: &ExecOptions) -> Result<ProcData, ExecError> {
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
        .stderr(pipes.stderr)
        .kill_on_drop(true);
    if let Some(cwd) = &opts.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        program: program.clone(),
        source,
    })?;
    drop(cmd);

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    // Tokio has no portable async handle for an anonymous pipe; the merged
    // stream is drained on the blocking pool instead.
    let merged = pipes.merged.map(|pipe| {
        task::spawn_blocking(move || {
            let buf = Mutex::new(Vec::new());
            command::pump(pipe, StreamClass::Output, &buf)?;
            Ok::<_, io::Error>(buf.into_inner().unwrap_or_else(PoisonError::into_inner))
        })
    });

    let out_buf = Mutex::new(Vec::new());
    let err_buf = Mutex::new(Vec::new());

    let (fed, out_res, err_res, merged_res) = tokio::join!(
        feed_stdin(stdin, opts.input.as_deref()),
        pump(stdout, StreamClass::Stdout, &out_buf),
        pump(stderr, StreamClass::Stderr, &err_buf),
        drain_merged(merged),
    );
    fed.map_err(io_err)?;
    out_res.map_err(io_err)?;
    err_res.map_err(io_err)?;
    let merged_out = merged_res.map_err(io_err)?;

    let status = child.wait().await.map_err(io_err)?;

    let mut stdout = out_buf.into_inner().unwrap_or_else(PoisonError::into_inner);
    stdout.extend_from_slice(&merged_out);
    let data = ProcData::new(
        exit_code(status),
        stdout,
        err_buf.into_inner().unwrap_or_else(PoisonError::into_inner),
        opts.decode_output,
    );
    finish(opts, data)
}

async fn feed_stdin(pipe: Option<ChildStdin>, input: Option<&[u8]>) -> io::Result<()> {
    let (Some(mut pipe), Some(input)) = (pipe, input) else {
        return Ok(());
    };
    let res = async {
        pipe.write_all(input).await?;
        pipe.shutdown().await
    }
    .await;
    match res {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

async fn pump<R>(stream: Option<R>, class: StreamClass, sink: &Mutex<Vec<u8>>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return Ok(());
    };
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        log_line(class, &line);
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(&line);
    }
}

async fn drain_merged(task: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match task {
        Some(task) => task.await.map_err(io::Error::other)?,
        None => Ok(Vec::new()),
    }
}
