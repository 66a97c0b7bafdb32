use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use devtype::clock::ManualClock;
use devtype::content::{Category, ContentProvider, Corpus};
use devtype::matcher::MatchOutcome;
use devtype::session::{Phase, Session, DEFAULT_DURATION};
use devtype::stats::accuracy;

/// Random mix of correct keys, wrong keys, backspaces and skips against the
/// embedded corpus, checking the session invariants after every event.
#[test]
fn random_play_keeps_invariants() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let provider =
            ContentProvider::seeded(Corpus::embedded().unwrap(), &Category::all(), seed).unwrap();
        let clock = ManualClock::new();
        let mut session = Session::with_clock(provider, clock.clone(), DEFAULT_DURATION);
        session.start();

        let mut previous = *session.stats();
        while session.phase() == Phase::Running {
            clock.advance(Duration::from_millis(rng.gen_range(50..400)));
            let before = session.snapshot();

            let snap = match rng.gen_range(0..20) {
                0 => session.skip(),
                1..=3 => {
                    let value = session.snippet().backspaced();
                    session.apply_input(&value)
                }
                4..=6 => {
                    let value = session.snippet().appended('\u{7f}');
                    session.apply_input(&value)
                }
                7 => session.tick(),
                _ => {
                    let expected = session.snippet().expected_char().unwrap();
                    let value = session.snippet().appended(expected);
                    session.apply_input(&value)
                }
            };

            let stats = snap.stats;
            assert!(stats.accuracy <= 100);
            assert_eq!(stats.accuracy, accuracy(stats.correct_chars, stats.total_chars));
            assert!(stats.correct_chars >= previous.correct_chars);
            assert!(stats.total_chars >= previous.total_chars);
            assert!(stats.errors >= previous.errors);
            assert!(stats.skips >= previous.skips);
            assert_eq!(
                stats.total_chars,
                stats.correct_chars + stats.errors,
                "every counted keystroke is either correct or an error"
            );

            if snap.phase == Phase::Running {
                let confirmed: String = snap.snippet.chars().take(snap.cursor).collect();
                assert!(snap.typed.starts_with(&confirmed));
                assert!(snap.cursor <= snap.snippet.chars().count());
            }

            if snap.last_outcome == Some(MatchOutcome::Blocked) {
                assert_eq!(snap.cursor, before.cursor);
                assert_eq!(snap.typed, before.typed);
            }

            previous = stats;
        }

        let ended = session.snapshot();
        assert_eq!(ended.phase, Phase::Ended);
        assert_eq!(session.end(), ended);
    }
}

#[test]
fn typing_each_snippet_adds_its_length() {
    let provider =
        ContentProvider::seeded(Corpus::embedded().unwrap(), &Category::all(), 5).unwrap();
    let clock = ManualClock::new();
    let mut session = Session::with_clock(provider, clock, DEFAULT_DURATION);
    session.start();

    for _ in 0..15 {
        let text = session.snippet().text().to_string();
        let before = session.stats().correct_chars;
        let mut completions = 0;

        for c in text.chars() {
            let value = session.snippet().appended(c);
            if session.apply_input(&value).last_outcome == Some(MatchOutcome::Completed) {
                completions += 1;
            }
        }

        assert_eq!(completions, 1, "{text:?} should complete exactly once");
        assert_eq!(
            session.stats().correct_chars - before,
            text.chars().count() as u32
        );
    }
}
