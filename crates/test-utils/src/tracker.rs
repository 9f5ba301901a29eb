use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Records how batch-runner callables were invoked:
/// - how many ran at the same time (peak),
/// - which inputs ran, in completion order.
#[derive(Debug, Default)]
pub struct ConcurrencyTracker {
    active: AtomicUsize,
    peak: AtomicUsize,
    completed: Mutex<Vec<usize>>,
}

impl ConcurrencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as running for `hold`, then as completed.
    pub fn visit(&self, id: usize, hold: Duration) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(hold);
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(id);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn completion_order(&self) -> Vec<usize> {
        self.completed.lock().unwrap().clone()
    }
}
