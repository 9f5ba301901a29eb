// src/pool/runner.rs

//! Scoped worker pool for a single batch.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, error};

use crate::errors::PoolError;
use crate::pool::WorkerCount;

/// Apply `func` to every element of `args` on a bounded thread pool.
///
/// - Each element produces exactly one call; tuples are destructured by the
///   closure (`|(a, b)| ...`).
/// - At most `max_workers` calls run at once (see [`WorkerCount::resolve`]
///   for `None`/`0`/negative handling). The pool never has more threads than
///   there are elements, and an empty `args` returns immediately without
///   building a pool.
/// - `results[i]` is the result of `args[i]`, whatever the completion order.
///
/// Failure policy is collect-all: every call runs to completion even if
/// another one panics. Once the batch is finished, the first panicking index
/// (lowest index, not first in time) is reported as
/// [`PoolError::TaskPanicked`]. Callables that can fail should return a
/// `Result` and go through [`try_thr_exec`].
pub fn thr_exec<A, R, F>(func: F, args: Vec<A>, max_workers: Option<i64>) -> Result<Vec<R>, PoolError>
where
    A: Send,
    R: Send,
    F: Fn(A) -> R + Sync,
{
    let workers = WorkerCount::resolve(max_workers)?;
    if args.is_empty() {
        return Ok(Vec::new());
    }

    let threads = workers.get().min(args.len());
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("xjfx-worker-{i}"))
        .build()?;

    debug!(tasks = args.len(), workers = threads, "dispatching batch");

    // Indexed parallel iterators collect in input order. One element per
    // split lets an idle worker steal the next pending input instead of
    // waiting behind a slow call in another worker's block.
    let outcomes: Vec<std::thread::Result<R>> = pool.install(|| {
        args.into_par_iter()
            .with_max_len(1)
            .map(|a| panic::catch_unwind(AssertUnwindSafe(|| func(a))))
            .collect()
    });

    let mut results = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(r) => results.push(r),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(index, %message, "task panicked");
                return Err(PoolError::TaskPanicked { index, message });
            }
        }
    }

    debug!(tasks = results.len(), "batch finished");
    Ok(results)
}

/// [`thr_exec`] for fallible callables.
///
/// Every call runs to completion; each `Err` is logged with its index and
/// left in place, so the caller always gets one entry per input.
pub fn try_thr_exec<A, R, E, F>(
    func: F,
    args: Vec<A>,
    max_workers: Option<i64>,
) -> Result<Vec<Result<R, E>>, PoolError>
where
    A: Send,
    R: Send,
    E: Send + Display,
    F: Fn(A) -> Result<R, E> + Sync,
{
    let results = thr_exec(func, args, max_workers)?;
    for (index, res) in results.iter().enumerate() {
        if let Err(e) = res {
            error!(index, error = %e, "error executing task");
        }
    }
    Ok(results)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
