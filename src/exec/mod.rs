// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs one external command, optionally feeding it input, and collects its
//! output according to a [`CaptureMode`].
//!
//! - [`options`] defines [`ExecOptions`], [`CaptureMode`] and [`StreamClass`].
//! - [`proc_data`] holds the [`ProcData`] result.
//! - [`command`] is the blocking executor built on `std::process`.
//! - [`async_command`] is the same contract on `tokio::process`.
//! - `report` holds the logging and exit-status handling both share.

pub mod async_command;
pub mod command;
pub mod options;
pub mod proc_data;
mod report;

pub use async_command::exec_cmd_async;
pub use command::exec_cmd;
pub use options::{join_args, CaptureMode, ExecOptions, StreamClass};
pub use proc_data::{CapturedOutput, ProcData};
