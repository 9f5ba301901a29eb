#![cfg(unix)]

use xjfx::errors::ExecError;
use xjfx::exec::{exec_cmd, CaptureMode, ExecOptions};
use xjfx_test_utils::{init_tracing, sh};

#[test]
fn nonzero_exit_fails_with_code_and_output() {
    init_tracing();
    let result = exec_cmd(&sh("echo partial; echo oops >&2; exit 7"));

    match result {
        Err(ExecError::NonZeroExit {
            command,
            retcode,
            output,
        }) => {
            assert_eq!(retcode, 7);
            assert_eq!(output.retcode, 7);
            assert!(command.starts_with("sh -c "));
            assert_eq!(output.stdout().as_text(), Some("partial\n"));
            assert_eq!(output.stderr().as_text(), Some("oops\n"));
        }
        Err(e) => panic!("Expected NonZeroExit, got: {:?}", e),
        Ok(d) => panic!("Expected error, got Ok({:?})", d),
    }
}

#[test]
fn nonzero_exit_in_combined_mode_carries_merged_output() {
    init_tracing();
    let err = exec_cmd(&sh("echo a; echo b >&2; exit 1").capture(CaptureMode::Combined)).unwrap_err();

    match err {
        ExecError::NonZeroExit { output, .. } => {
            assert_eq!(output.stdout_lossy(), "a\nb\n");
        }
        other => panic!("Expected NonZeroExit, got: {:?}", other),
    }
}

#[test]
fn ignore_retcode_reports_exit_code() {
    init_tracing();
    let data = exec_cmd(&sh("echo still here; exit 3").ignore_retcode(true)).unwrap();

    assert_eq!(data.retcode, 3);
    assert!(!data.success());
    assert_eq!(data.stdout().as_text(), Some("still here\n"));
}

#[test]
fn missing_program_is_a_spawn_error() {
    init_tracing();
    let result = exec_cmd(&ExecOptions::new(["xjfx-definitely-not-a-real-program"]));

    match result {
        Err(ExecError::Spawn { program, source }) => {
            assert_eq!(program, "xjfx-definitely-not-a-real-program");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected Spawn error, got: {:?}", other),
    }
}

#[test]
fn spawn_error_is_not_suppressed_by_ignore_retcode() {
    init_tracing();
    let opts = ExecOptions::new(["xjfx-definitely-not-a-real-program"]).ignore_retcode(true);
    assert!(matches!(exec_cmd(&opts), Err(ExecError::Spawn { .. })));
}

#[test]
fn missing_cwd_is_a_spawn_error() {
    init_tracing();
    let opts = ExecOptions::new(["true"]).cwd("/definitely/not/a/dir/for/xjfx");
    assert!(matches!(exec_cmd(&opts), Err(ExecError::Spawn { .. })));
}

#[test]
fn killed_by_signal_reports_minus_one() {
    init_tracing();
    let err = exec_cmd(&sh("kill -9 $$")).unwrap_err();
    assert_eq!(err.retcode(), Some(-1));
}

#[test]
fn empty_command_is_rejected() {
    let opts = ExecOptions::new(Vec::<String>::new()).ignore_retcode(true);
    assert!(matches!(exec_cmd(&opts), Err(ExecError::EmptyCommand)));
}
