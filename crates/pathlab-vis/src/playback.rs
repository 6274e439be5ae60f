//! Playback controls for a generated trace.
//!
//! The controller owns a cursor into the trace (`-1` before the first step)
//! and at most one pending auto-advance timer. Every transition out of
//! Playing cancels that timer before anything else changes, so two timers can
//! never race to advance the cursor twice.

use std::time::Duration;

use pathlab_trace::{Step, Trace};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};

/// Default delay between auto-advanced steps.
pub const DEFAULT_INTERVAL_MS: u64 = 1200;

/// Smallest accepted delay.
pub const MIN_INTERVAL_MS: u64 = 1;

/// Cursor value before the first step.
pub const BEFORE_START: isize = -1;

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Cursor is before the first step
    Idle,
    /// Not advancing; includes resting on the final step
    Paused,
    /// Advancing on a timer
    Playing,
}

/// Playback controller for a step trace.
pub struct Playback<S: Scheduler> {
    trace: Trace,
    cursor: isize,
    playing: bool,
    interval: Duration,
    scheduler: S,
    pending: Option<TimerHandle>,
}

impl<S: Scheduler> Playback<S> {
    /// Create an idle controller over `trace`.
    pub fn new(trace: Trace, scheduler: S) -> Self {
        Self {
            trace,
            cursor: BEFORE_START,
            playing: false,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            scheduler,
            pending: None,
        }
    }

    /// Get the current cursor, `-1` before the first step.
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else if self.cursor == BEFORE_START {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the cursor rests on the final step.
    pub fn is_finished(&self) -> bool {
        self.last_cursor() != BEFORE_START && self.cursor == self.last_cursor()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Get the total number of steps.
    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    /// The step under the cursor, `None` while idle.
    pub fn current_step(&self) -> Option<&Step> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|i| self.trace.get(i))
    }

    /// Pseudocode line for the current step.
    pub fn highlighted_line(&self) -> Option<usize> {
        let step = self.current_step()?;
        self.trace.algorithm().line_for(step.program_point)
    }

    /// Fraction of the trace shown so far, `(cursor + 1) / len`.
    pub fn progress(&self) -> f64 {
        if self.trace.is_empty() {
            0.0
        } else {
            (self.cursor + 1) as f64 / self.trace.len() as f64
        }
    }

    /// The timer currently armed, if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start advancing. No-op when already playing or on the final step.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        if self.cursor >= self.last_cursor() {
            debug!(cursor = self.cursor, "nothing left to play");
            return;
        }
        self.playing = true;
        self.arm();
        debug!(cursor = self.cursor, interval_ms = self.interval.as_millis() as u64, "playing");
    }

    /// Stop advancing without moving the cursor. Idempotent.
    pub fn pause(&mut self) {
        self.disarm();
        if self.playing {
            self.playing = false;
            debug!(cursor = self.cursor, "paused");
        }
    }

    /// Deliver a fired timer. Returns whether the cursor advanced.
    ///
    /// Handles that are not the one currently armed (cancelled, or from a
    /// trace that has since been replaced) are ignored.
    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            trace!(timer = handle.id(), "ignoring stale timer");
            return false;
        }
        self.pending = None;
        if !self.playing {
            return false;
        }

        let last = self.last_cursor();
        self.cursor = (self.cursor + 1).min(last);
        if self.cursor < last {
            self.arm();
        } else {
            self.playing = false;
            debug!(cursor = self.cursor, "reached final step");
        }
        true
    }

    /// Move one step forward. Ignored while playing.
    pub fn step_forward(&mut self) -> bool {
        if self.playing || self.cursor >= self.last_cursor() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move one step back, stopping playback first if needed.
    pub fn step_back(&mut self) -> bool {
        self.pause();
        if self.cursor <= BEFORE_START {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Jump to `cursor`, clamped to `[-1, len - 1]`. Stops playback.
    pub fn seek(&mut self, cursor: isize) {
        self.pause();
        self.cursor = cursor.clamp(BEFORE_START, self.last_cursor());
    }

    /// Stop and return to before the first step.
    pub fn reset(&mut self) {
        self.disarm();
        self.playing = false;
        self.cursor = BEFORE_START;
    }

    /// Change the auto-advance delay. Applies from the next scheduled tick.
    pub fn set_speed(&mut self, interval_ms: u64) {
        self.interval = Duration::from_millis(interval_ms.max(MIN_INTERVAL_MS));
    }

    /// Replace the trace; implies [`reset`](Self::reset).
    pub fn load_trace(&mut self, trace: Trace) {
        self.reset();
        debug!(algorithm = %trace.algorithm(), steps = trace.len(), "loaded trace");
        self.trace = trace;
    }

    fn last_cursor(&self) -> isize {
        self.trace
            .last_index()
            .map_or(BEFORE_START, |last| last as isize)
    }

    fn arm(&mut self) {
        self.disarm();
        self.pending = Some(self.scheduler.schedule(self.interval));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for Playback<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl Playback<ManualScheduler> {
    /// Run the virtual clock forward by `by`, delivering every timer that
    /// comes due on the way, including ones armed by earlier ticks.
    ///
    /// Returns how many steps the cursor advanced.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now().saturating_add(by);
        let mut advanced = 0;
        while let Some(deadline) = self.scheduler.next_deadline().filter(|&d| d <= target) {
            for handle in self.scheduler.advance_to(deadline) {
                if self.tick(handle) {
                    advanced += 1;
                }
            }
        }
        self.scheduler.advance_to(target);
        advanced
    }
}

/// Playback status for sending to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub algorithm: pathlab_trace::Algorithm,
    pub cursor: isize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub finished: bool,
    pub interval_ms: u64,
    pub progress: f64,
}

impl<S: Scheduler> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            algorithm: playback.trace.algorithm(),
            cursor: playback.cursor,
            total_steps: playback.total_steps(),
            state: playback.state(),
            finished: playback.is_finished(),
            interval_ms: playback.interval.as_millis() as u64,
            progress: playback.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_graph::fixtures;
    use pathlab_trace::{generate, Algorithm};

    const TICK: Duration = Duration::from_millis(DEFAULT_INTERVAL_MS);

    fn bfs_playback() -> Playback<ManualScheduler> {
        let tree = fixtures::tree().unwrap();
        Playback::new(generate(&tree, Algorithm::Bfs).unwrap(), ManualScheduler::new())
    }

    #[test]
    fn playback_starts_idle() {
        let playback = bfs_playback();
        assert_eq!(playback.cursor(), -1);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.current_step().is_none());
        assert_eq!(playback.progress(), 0.0);
    }

    #[test]
    fn play_advances_one_step_per_interval() {
        let mut playback = bfs_playback();
        playback.play();
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.scheduler().pending(), 1);

        assert_eq!(playback.advance(TICK - Duration::from_millis(1)), 0);
        assert_eq!(playback.cursor(), -1);

        assert_eq!(playback.advance(Duration::from_millis(1)), 1);
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.advance(TICK * 3), 3);
        assert_eq!(playback.cursor(), 3);
        assert_eq!(playback.scheduler().pending(), 1);
    }

    #[test]
    fn play_runs_to_end_without_wrapping() {
        let mut playback = bfs_playback();
        let len = playback.total_steps() as isize;
        playback.play();

        let mut last = playback.cursor();
        for _ in 0..(len + 5) {
            playback.advance(TICK);
            assert!(playback.cursor() >= last, "cursor moved backwards while playing");
            last = playback.cursor();
        }

        assert_eq!(playback.cursor(), len - 1);
        assert!(playback.is_finished());
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.scheduler().pending(), 0);
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn play_at_final_step_is_noop() {
        let mut playback = bfs_playback();
        playback.seek(isize::MAX);
        playback.play();
        assert!(!playback.is_playing());
        assert_eq!(playback.scheduler().pending(), 0);
    }

    #[test]
    fn pause_halts_until_play() {
        let mut playback = bfs_playback();
        playback.play();
        playback.advance(TICK * 2);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.scheduler().pending(), 0);

        assert_eq!(playback.advance(TICK * 10), 0);
        assert_eq!(playback.cursor(), 1);

        playback.play();
        playback.advance(TICK);
        assert_eq!(playback.cursor(), 2);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut once = bfs_playback();
        let mut twice = bfs_playback();
        for playback in [&mut once, &mut twice] {
            playback.play();
            playback.advance(TICK * 2);
        }
        once.pause();
        twice.pause();
        twice.pause();

        assert_eq!(PlaybackStatus::from(&once), PlaybackStatus::from(&twice));
    }

    #[test]
    fn reset_mid_playback_cancels_timer() {
        let mut playback = bfs_playback();
        playback.play();
        playback.advance(TICK * 4);
        playback.reset();

        assert_eq!(playback.cursor(), -1);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.scheduler().pending(), 0);
        assert_eq!(playback.advance(TICK * 5), 0);

        playback.play();
        playback.advance(TICK);
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.current_step(), playback.trace().get(0));
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut playback = bfs_playback();
        playback.play();
        let old = playback.pending_timer().unwrap();
        playback.pause();
        playback.play();

        assert!(!playback.tick(old));
        assert_eq!(playback.cursor(), -1);

        let current = playback.pending_timer().unwrap();
        assert!(playback.tick(current));
        assert_eq!(playback.cursor(), 0);
    }

    #[test]
    fn step_forward_blocked_while_playing() {
        let mut playback = bfs_playback();
        assert!(playback.step_forward());
        assert_eq!(playback.cursor(), 0);

        playback.play();
        assert!(!playback.step_forward());
        assert_eq!(playback.cursor(), 0);
    }

    #[test]
    fn step_back_stops_playback_and_clamps() {
        let mut playback = bfs_playback();
        playback.play();
        playback.advance(TICK * 2);

        assert!(playback.step_back());
        assert_eq!(playback.cursor(), 0);
        assert!(!playback.is_playing());
        assert_eq!(playback.scheduler().pending(), 0);

        assert!(playback.step_back());
        assert!(!playback.step_back());
        assert_eq!(playback.cursor(), -1);
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn step_forward_clamps_at_end() {
        let mut playback = bfs_playback();
        let len = playback.total_steps();
        for _ in 0..len {
            assert!(playback.step_forward());
        }
        assert!(!playback.step_forward());
        assert!(playback.is_finished());
    }

    #[test]
    fn speed_change_applies_to_next_tick() {
        let mut playback = bfs_playback();
        playback.play();
        playback.set_speed(100);

        // Already-armed timer keeps the old delay.
        assert_eq!(playback.advance(Duration::from_millis(100)), 0);
        assert_eq!(playback.advance(TICK - Duration::from_millis(100)), 1);
        assert_eq!(playback.advance(Duration::from_millis(100)), 1);
        assert_eq!(playback.interval(), Duration::from_millis(100));
    }

    #[test]
    fn advance_by_max_duration_runs_to_end() {
        let mut playback = bfs_playback();
        playback.play();

        assert_eq!(playback.advance(Duration::MAX), playback.total_steps());
        assert!(playback.is_finished());
        assert_eq!(playback.scheduler().now(), Duration::MAX);
        assert_eq!(playback.advance(Duration::MAX), 0);
    }

    #[test]
    fn zero_speed_clamped() {
        let mut playback = bfs_playback();
        playback.set_speed(0);
        assert_eq!(playback.interval(), Duration::from_millis(MIN_INTERVAL_MS));
    }

    #[test]
    fn load_trace_resets() {
        let mut playback = bfs_playback();
        playback.play();
        playback.advance(TICK * 3);

        let net = fixtures::network().unwrap();
        playback.load_trace(generate(&net, Algorithm::Dijkstra).unwrap());

        assert_eq!(playback.cursor(), -1);
        assert!(!playback.is_playing());
        assert_eq!(playback.scheduler().pending(), 0);
        assert_eq!(playback.trace().algorithm(), Algorithm::Dijkstra);
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let mut playback = bfs_playback();
        let last = playback.total_steps() as isize - 1;

        playback.seek(5);
        assert_eq!(playback.cursor(), 5);
        playback.seek(1000);
        assert_eq!(playback.cursor(), last);
        playback.seek(-50);
        assert_eq!(playback.cursor(), -1);
    }

    #[test]
    fn highlighted_line_follows_program_point() {
        let mut playback = bfs_playback();
        assert_eq!(playback.highlighted_line(), None);
        playback.step_forward();
        assert_eq!(playback.highlighted_line(), Some(0));
        playback.step_forward();
        assert_eq!(playback.highlighted_line(), Some(2));
        playback.step_forward();
        assert_eq!(playback.highlighted_line(), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (sched, mut rx) = crate::scheduler::TokioScheduler::new();
        let tree = fixtures::tree().unwrap();
        let mut playback = Playback::new(generate(&tree, Algorithm::Bfs).unwrap(), sched);
        playback.set_speed(10);
        playback.play();
        drop(playback);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn status_conversion() {
        let mut playback = bfs_playback();
        playback.seek(3);
        playback.set_speed(500);

        let status = PlaybackStatus::from(&playback);
        assert_eq!(status.cursor, 3);
        assert_eq!(status.total_steps, 22);
        assert_eq!(status.state, PlaybackState::Paused);
        assert_eq!(status.interval_ms, 500);
        assert_eq!(status.algorithm, Algorithm::Bfs);
        assert!(!status.finished);
    }
}
