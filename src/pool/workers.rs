// src/pool/workers.rs

use std::num::NonZeroUsize;
use std::thread;

use crate::errors::PoolError;

/// Upper bound on the default pool size.
const MAX_DEFAULT_WORKERS: usize = 32;

/// Extra threads on top of the core count in the default size, since the
/// typical workload (waiting on subprocesses) is I/O bound.
const IO_HEADROOM: usize = 4;

/// A validated, non-zero number of worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    /// Resolve a caller-supplied worker count.
    ///
    /// `None` and `Some(0)` fall back to [`WorkerCount::default_for_host`];
    /// negative values are rejected.
    pub fn resolve(requested: Option<i64>) -> Result<Self, PoolError> {
        match requested {
            None | Some(0) => Ok(Self::default_for_host()),
            Some(n) if n < 0 => Err(PoolError::InvalidWorkerCount(n)),
            Some(n) => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                NonZeroUsize::new(n)
                    .map(Self)
                    .ok_or(PoolError::InvalidWorkerCount(0))
            }
        }
    }

    /// `min(32, available_parallelism + 4)`.
    pub fn default_for_host() -> Self {
        let cpus = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let n = (cpus + IO_HEADROOM).min(MAX_DEFAULT_WORKERS);
        Self(NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}
