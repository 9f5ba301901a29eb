#![cfg(unix)]

use xjfx::errors::ExecError;
use xjfx::exec::{exec_cmd, exec_cmd_async, CaptureMode, CapturedOutput, ExecOptions};
use xjfx_test_utils::{init_tracing, sh, with_timeout};

#[tokio::test]
async fn async_matches_blocking_for_separate_streams() {
    init_tracing();
    let opts = sh("echo out; echo err >&2");

    let async_data = with_timeout(exec_cmd_async(&opts)).await.unwrap();
    let blocking_data = exec_cmd(&opts).unwrap();

    assert_eq!(async_data, blocking_data);
}

#[tokio::test]
async fn async_stdin_round_trip() {
    init_tracing();
    let opts = ExecOptions::new(["cat"]).input("ping\n").decode_output(false);
    let data = with_timeout(exec_cmd_async(&opts)).await.unwrap();
    assert_eq!(data.stdout(), CapturedOutput::Bytes(b"ping\n".to_vec()));
}

#[tokio::test]
async fn async_combined_and_ignore_retcode() {
    init_tracing();
    let opts = sh("echo a; echo b >&2; exit 9")
        .capture(CaptureMode::Combined)
        .ignore_retcode(true);
    let data = with_timeout(exec_cmd_async(&opts)).await.unwrap();

    assert_eq!(data.retcode, 9);
    assert_eq!(data.stdout_lossy(), "a\nb\n");
    assert!(data.stderr().is_empty());
}

#[tokio::test]
async fn async_spawn_failure() {
    init_tracing();
    let opts = ExecOptions::new(["xjfx-definitely-not-a-real-program"]);
    let res = with_timeout(exec_cmd_async(&opts)).await;
    assert!(matches!(res, Err(ExecError::Spawn { .. })));
}
