// src/pool/mod.rs

//! Parallel batch runner.
//!
//! Fans one function out over many argument tuples on a bounded thread pool
//! that lives only for the duration of the call, and returns the results in
//! input order.
//!
//! - [`workers`] resolves the requested worker count.
//! - [`runner`] owns the pool and the per-task failure policy.

pub mod runner;
pub mod workers;

pub use runner::{thr_exec, try_thr_exec};
pub use workers::WorkerCount;
