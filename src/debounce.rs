//! Debounced query emitter
//!
//! Turns raw input edits and submits into normalized queries. A blank input is
//! emitted at once; anything else waits for a quiet period after the last
//! edit. Submitting flushes immediately. Time is passed in by the caller so the
//! event loop (or a test) decides what "now" is.

use std::time::{Duration, Instant};

/// Quiet period between the last edit and an automatic search
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A scheduled emission. Dropping it cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEmit {
    value: String,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    raw: String,
    pending: Option<PendingEmit>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            raw: String::new(),
            pending: None,
        }
    }

    /// Record an edit. Returns the empty query right away when the input is
    /// blank; otherwise (re)schedules and returns `None`.
    pub fn on_change(&mut self, raw: &str, now: Instant) -> Option<String> {
        self.raw = raw.to_string();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            self.pending = None;
            return Some(String::new());
        }

        self.pending = Some(PendingEmit {
            value: trimmed.to_string(),
            deadline: now + self.quiet_period,
        });
        None
    }

    /// Explicit submit: cancel whatever is scheduled and emit the current value
    pub fn submit(&mut self) -> String {
        self.pending = None;
        self.raw.trim().to_string()
    }

    /// Emit the scheduled value once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Time left until the scheduled emission, if any
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(now))
    }
}
