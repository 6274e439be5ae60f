//! Cancellable single-shot timers driving auto-advance.
//!
//! A [`Scheduler`] hands out a [`TimerHandle`] for every scheduled delay and
//! later reports that handle as fired. Whoever owns the event loop delivers
//! fired handles back to [`Playback::tick`](crate::Playback::tick), which
//! ignores any handle it is no longer waiting on.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of single-shot timers.
pub trait Scheduler {
    /// Arrange for a new handle to fire after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Prevent `handle` from firing. Cancelling a fired or unknown handle is a
    /// no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Virtual-clock scheduler. Time only moves when [`advance`](Self::advance)
/// is called, which makes playback fully deterministic.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Move the clock forward by `by` and return the handles that came due,
    /// earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.advance_to(self.now.saturating_add(by))
    }

    /// Move the clock to `at` (never backwards) and return the handles that
    /// came due, earliest first.
    pub fn advance_to(&mut self, at: Duration) -> Vec<TimerHandle> {
        self.now = self.now.max(at);
        let mut due: Vec<_> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= self.now)
            .map(|(&handle, &deadline)| (deadline, handle))
            .collect();
        due.sort();
        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle, self.now.saturating_add(delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle);
    }
}

/// Tokio-backed scheduler: one sleeping task per timer.
///
/// Fired handles arrive on the receiver returned by [`TokioScheduler::new`].
/// `cancel` aborts the sleeping task; a handle that fired just before being
/// cancelled may still arrive and must be ignored by the receiver's owner.
///
/// `schedule` must be called from within a Tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<TimerHandle>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired,
        };
        (scheduler, rx)
    }

    /// Number of timer tasks still sleeping.
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session was torn down.
            let _ = fired.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
