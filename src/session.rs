use serde::Serialize;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::content::SnippetSource;
use crate::matcher::{MatchOutcome, SnippetCursor};
use crate::stats::Stats;

pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Everything the front-end needs to render one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub snippet: String,
    pub cursor: usize,
    pub typed: String,
    pub stats: Stats,
    pub last_outcome: Option<MatchOutcome>,
}

/// Discrete inputs that drive a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Input(String),
    Skip,
    End,
    Tick,
}

/// One timed typing game: phase, timing, the active snippet and its stats
#[derive(Debug)]
pub struct Session<S: SnippetSource, C: Clock = SystemClock> {
    source: S,
    clock: C,
    duration: Duration,
    phase: Phase,
    started_at: Option<Instant>,
    remaining: Duration,
    snippet: SnippetCursor,
    stats: Stats,
    last_outcome: Option<MatchOutcome>,
}

impl<S: SnippetSource> Session<S, SystemClock> {
    pub fn new(source: S, duration: Duration) -> Self {
        Self::with_clock(source, SystemClock, duration)
    }
}

impl<S: SnippetSource, C: Clock> Session<S, C> {
    pub fn with_clock(source: S, clock: C, duration: Duration) -> Self {
        Self {
            source,
            clock,
            duration,
            phase: Phase::Idle,
            started_at: None,
            remaining: duration,
            snippet: SnippetCursor::new(String::new()),
            stats: Stats::default(),
            last_outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn snippet(&self) -> &SnippetCursor {
        &self.snippet
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Time since start, read from the clock
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|t| self.clock.now().saturating_duration_since(t))
            .unwrap_or_default()
    }

    pub fn handle(&mut self, event: SessionEvent) -> Snapshot {
        match event {
            SessionEvent::Start => self.start(),
            SessionEvent::Input(value) => self.apply_input(&value),
            SessionEvent::Skip => self.skip(),
            SessionEvent::End => self.end(),
            SessionEvent::Tick => self.tick(),
        }
    }

    /// Begins a new game from Idle or Ended. Ignored while running.
    pub fn start(&mut self) -> Snapshot {
        if self.phase == Phase::Running {
            return self.snapshot();
        }

        self.stats = Stats::default();
        self.started_at = Some(self.clock.now());
        self.remaining = self.duration;
        self.snippet = SnippetCursor::new(self.source.next_snippet());
        self.last_outcome = None;
        self.phase = Phase::Running;
        log::debug!(
            "session started for {}s with {:?}",
            self.duration.as_secs(),
            self.snippet.text()
        );

        self.snapshot()
    }

    /// Re-reads the clock and ends the game once the time is up
    pub fn tick(&mut self) -> Snapshot {
        if self.phase != Phase::Running {
            return self.snapshot();
        }

        self.remaining = self.duration.saturating_sub(self.elapsed());
        if self.remaining.is_zero() {
            return self.end();
        }

        self.snapshot()
    }

    /// Stops the game and computes the final WPM from the exact elapsed time.
    /// Calling it outside of Running changes nothing.
    pub fn end(&mut self) -> Snapshot {
        if self.phase != Phase::Running {
            return self.snapshot();
        }

        let elapsed = self.elapsed();
        self.remaining = self.duration.saturating_sub(elapsed);
        self.stats.refresh_wpm(elapsed);
        self.phase = Phase::Ended;
        log::debug!(
            "session ended after {:.1}s: {} wpm, {}% accuracy, {} skips",
            elapsed.as_secs_f64(),
            self.stats.wpm,
            self.stats.accuracy,
            self.stats.skips
        );

        self.snapshot()
    }

    /// Feeds a new value of the input buffer to the matcher
    pub fn apply_input(&mut self, value: &str) -> Snapshot {
        if self.expire_if_due() {
            return self.snapshot();
        }

        let outcome = self.snippet.apply_input(value);
        match outcome {
            MatchOutcome::Accepted => self.stats.record_correct(),
            MatchOutcome::Completed => {
                self.stats.record_correct();
                log::debug!("completed {:?}", self.snippet.text());
                self.snippet = SnippetCursor::new(self.source.next_snippet());
            }
            MatchOutcome::Rejected => self.stats.record_error(),
            MatchOutcome::Edited | MatchOutcome::Blocked => {}
        }
        if outcome.is_keystroke() {
            self.stats.refresh_wpm(self.elapsed());
        }
        self.last_outcome = Some(outcome);

        self.snapshot()
    }

    /// Swaps the active snippet for a fresh one at a penalty
    pub fn skip(&mut self) -> Snapshot {
        if self.expire_if_due() {
            return self.snapshot();
        }

        log::debug!("skipped {:?}", self.snippet.text());
        self.snippet = SnippetCursor::new(self.source.next_snippet());
        self.stats.record_skip();
        self.stats.refresh_wpm(self.elapsed());
        self.last_outcome = None;

        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            remaining_secs: ceil_secs(self.remaining),
            snippet: self.snippet.text().to_string(),
            cursor: self.snippet.cursor(),
            typed: self.snippet.typed().to_string(),
            stats: self.stats,
            last_outcome: self.last_outcome,
        }
    }

    /// Returns true when the session is not accepting input: either it is
    /// not running, or its time ran out before the next tick noticed.
    fn expire_if_due(&mut self) -> bool {
        if self.phase != Phase::Running {
            return true;
        }
        self.remaining = self.duration.saturating_sub(self.elapsed());
        if self.remaining.is_zero() {
            self.end();
            return true;
        }
        false
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
