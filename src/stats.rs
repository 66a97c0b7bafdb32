use serde::Serialize;
use std::time::Duration;

/// Characters counted as one word for WPM
pub const CHARS_PER_WORD: f64 = 5.0;
/// Errors (and total characters) charged for skipping a snippet
pub const SKIP_PENALTY: u32 = 10;

/// `round(100 * correct / total)`, or 100 when nothing has been typed yet
pub fn accuracy(correct_chars: u32, total_chars: u32) -> u32 {
    if total_chars == 0 {
        return 100;
    }
    ((correct_chars as f64 / total_chars as f64) * 100.0).round() as u32
}

/// `round((correct / 5) / elapsed_minutes)`, or 0 when no time has passed
pub fn wpm(correct_chars: u32, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Character-level statistics for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub correct_chars: u32,
    pub total_chars: u32,
    pub errors: u32,
    pub skips: u32,
    pub accuracy: u32,
    pub wpm: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            correct_chars: 0,
            total_chars: 0,
            errors: 0,
            skips: 0,
            accuracy: 100,
            wpm: 0,
        }
    }
}

impl Stats {
    pub fn record_correct(&mut self) {
        self.correct_chars += 1;
        self.total_chars += 1;
        self.refresh_accuracy();
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
        self.total_chars += 1;
        self.refresh_accuracy();
    }

    pub fn record_skip(&mut self) {
        self.errors += SKIP_PENALTY;
        self.total_chars += SKIP_PENALTY;
        self.skips += 1;
        self.refresh_accuracy();
    }

    pub fn refresh_wpm(&mut self, elapsed: Duration) {
        self.wpm = wpm(self.correct_chars, elapsed);
    }

    /// Total characters charged for skips
    pub fn penalty(&self) -> u32 {
        self.skips * SKIP_PENALTY
    }

    fn refresh_accuracy(&mut self) {
        self.accuracy = accuracy(self.correct_chars, self.total_chars);
    }
}
