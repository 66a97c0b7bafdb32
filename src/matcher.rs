use serde::Serialize;

/// What happened to one change of the input buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    /// The character at the cursor matched and the cursor advanced
    Accepted,
    /// As `Accepted`, and the snippet is now fully typed
    Completed,
    /// The character at the cursor did not match; the buffer was trimmed back
    Rejected,
    /// A deletion of unconfirmed characters, taken verbatim
    Edited,
    /// The edit would have removed or altered a confirmed character
    Blocked,
}

impl MatchOutcome {
    /// Whether the keystroke counts towards `total_chars`
    pub fn is_keystroke(self) -> bool {
        matches!(
            self,
            MatchOutcome::Accepted | MatchOutcome::Completed | MatchOutcome::Rejected
        )
    }
}

/// The active snippet and how far into it the user has typed correctly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCursor {
    text: String,
    text_len: usize,
    cursor: usize,
    typed: String,
}

impl SnippetCursor {
    pub fn new(text: String) -> Self {
        let text_len = text.chars().count();
        Self {
            text,
            text_len,
            cursor: 0,
            typed: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of confirmed characters, counted in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.text_len
    }

    /// The character the user has to type next
    pub fn expected_char(&self) -> Option<char> {
        self.text.chars().nth(self.cursor)
    }

    /// The confirmed part of the snippet
    pub fn confirmed(&self) -> &str {
        &self.text[..byte_offset(&self.text, self.cursor)]
    }

    /// The untouched part of the snippet after the expected character
    pub fn remaining(&self) -> &str {
        let start = byte_offset(&self.text, (self.cursor + 1).min(self.text_len));
        &self.text[start..]
    }

    /// Buffer value after typing `c`
    pub fn appended(&self, c: char) -> String {
        let mut value = self.typed.clone();
        value.push(c);
        value
    }

    /// Buffer value after a backspace
    pub fn backspaced(&self) -> String {
        let mut value = self.typed.clone();
        value.pop();
        value
    }

    /// Applies a new value of the input buffer.
    ///
    /// Only the character at the cursor is checked, so at most one character
    /// is confirmed per call. Characters past it are dropped from the buffer.
    pub fn apply_input(&mut self, new_value: &str) -> MatchOutcome {
        if !new_value.starts_with(self.confirmed()) {
            return MatchOutcome::Blocked;
        }

        let new_len = new_value.chars().count();
        if new_len <= self.cursor {
            self.typed = new_value.to_string();
            return MatchOutcome::Edited;
        }

        let Some(expected) = self.expected_char() else {
            return MatchOutcome::Blocked;
        };
        let typed_char = new_value.chars().nth(self.cursor);

        if typed_char == Some(expected) {
            self.cursor += 1;
            self.typed = self.confirmed().to_string();
            if self.is_complete() {
                MatchOutcome::Completed
            } else {
                MatchOutcome::Accepted
            }
        } else {
            self.typed = self.confirmed().to_string();
            MatchOutcome::Rejected
        }
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = SnippetCursor::new("API".to_string());

        assert_eq!(cursor.text(), "API");
        assert_eq!(cursor.cursor(), 0);
        assert_eq!(cursor.typed(), "");
        assert_eq!(cursor.expected_char(), Some('A'));
        assert!(!cursor.is_complete());
    }

    #[test]
    fn test_matching_sequence_advances() {
        let mut cursor = SnippetCursor::new("API".to_string());

        assert_eq!(cursor.apply_input("A"), MatchOutcome::Accepted);
        assert_eq!(cursor.cursor(), 1);
        assert_eq!(cursor.apply_input("AP"), MatchOutcome::Accepted);
        assert_eq!(cursor.cursor(), 2);
        assert_eq!(cursor.apply_input("API"), MatchOutcome::Completed);
        assert_eq!(cursor.cursor(), 3);
        assert_eq!(cursor.typed(), "API");
        assert!(cursor.is_complete());
    }

    #[test]
    fn test_mismatch_trims_buffer() {
        let mut cursor = SnippetCursor::new("API".to_string());

        assert_eq!(cursor.apply_input("X"), MatchOutcome::Rejected);
        assert_eq!(cursor.cursor(), 0);
        assert_eq!(cursor.typed(), "");

        cursor.apply_input("A");
        assert_eq!(cursor.apply_input("AQ"), MatchOutcome::Rejected);
        assert_eq!(cursor.cursor(), 1);
        assert_eq!(cursor.typed(), "A");
    }

    #[test]
    fn test_deleting_confirmed_char_is_blocked() {
        let mut cursor = SnippetCursor::new("API".to_string());
        cursor.apply_input("A");
        cursor.apply_input("AP");

        assert_eq!(cursor.apply_input("A"), MatchOutcome::Blocked);
        assert_eq!(cursor.cursor(), 2);
        assert_eq!(cursor.typed(), "AP");

        assert_eq!(cursor.apply_input(""), MatchOutcome::Blocked);
        assert_eq!(cursor.typed(), "AP");
    }

    #[test]
    fn test_altering_confirmed_char_is_blocked() {
        let mut cursor = SnippetCursor::new("API".to_string());
        cursor.apply_input("A");

        assert_eq!(cursor.apply_input("XP"), MatchOutcome::Blocked);
        assert_eq!(cursor.cursor(), 1);
        assert_eq!(cursor.typed(), "A");
    }

    #[test]
    fn test_backspace_on_confirmed_prefix_is_blocked() {
        let mut cursor = SnippetCursor::new("API".to_string());
        cursor.apply_input("A");

        let value = cursor.backspaced();
        assert_eq!(value, "");
        assert_eq!(cursor.apply_input(&value), MatchOutcome::Blocked);
        assert_eq!(cursor.typed(), "A");
    }

    #[test]
    fn test_unchanged_buffer_is_an_edit() {
        let mut cursor = SnippetCursor::new("API".to_string());
        cursor.apply_input("A");

        assert_eq!(cursor.apply_input("A"), MatchOutcome::Edited);
        assert_eq!(cursor.cursor(), 1);
    }

    #[test]
    fn test_paste_checks_only_char_at_cursor() {
        let mut cursor = SnippetCursor::new("API".to_string());

        // Only 'A' is checked; the unchecked tail is dropped
        assert_eq!(cursor.apply_input("AXX"), MatchOutcome::Accepted);
        assert_eq!(cursor.cursor(), 1);
        assert_eq!(cursor.typed(), "A");

        assert_eq!(cursor.apply_input("AXP"), MatchOutcome::Rejected);
        assert_eq!(cursor.cursor(), 1);
        assert_eq!(cursor.typed(), "A");
    }

    #[test]
    fn test_confirmed_prefix_always_matches_text() {
        let mut cursor = SnippetCursor::new("git add .".to_string());

        for value in ["g", "gx", "gi", "gi", "g", "git", "git ", "git a", "xit a"] {
            cursor.apply_input(value);
            let prefix: String = cursor.typed().chars().take(cursor.cursor()).collect();
            let expected: String = cursor.text().chars().take(cursor.cursor()).collect();
            assert_eq!(prefix, expected);
        }
    }

    #[test]
    fn test_multibyte_text() {
        let mut cursor = SnippetCursor::new("déjà vu".to_string());

        assert_eq!(cursor.apply_input("d"), MatchOutcome::Accepted);
        assert_eq!(cursor.apply_input("dé"), MatchOutcome::Accepted);
        assert_eq!(cursor.confirmed(), "dé");
        assert_eq!(cursor.expected_char(), Some('j'));
        assert_eq!(cursor.remaining(), "à vu");
        assert_eq!(cursor.apply_input("déx"), MatchOutcome::Rejected);
        assert_eq!(cursor.typed(), "dé");
    }

    #[test]
    fn test_appended_and_backspaced() {
        let mut cursor = SnippetCursor::new("ab".to_string());
        assert_eq!(cursor.appended('a'), "a");

        cursor.apply_input("a");
        assert_eq!(cursor.appended('b'), "ab");
        assert_eq!(cursor.backspaced(), "");
    }

    #[test]
    fn test_remaining_at_end() {
        let mut cursor = SnippetCursor::new("ab".to_string());
        cursor.apply_input("a");
        assert_eq!(cursor.remaining(), "");
        cursor.apply_input("ab");
        assert_eq!(cursor.remaining(), "");
        assert_eq!(cursor.expected_char(), None);
    }

    #[test]
    fn test_is_keystroke() {
        assert!(MatchOutcome::Accepted.is_keystroke());
        assert!(MatchOutcome::Completed.is_keystroke());
        assert!(MatchOutcome::Rejected.is_keystroke());
        assert!(!MatchOutcome::Edited.is_keystroke());
        assert!(!MatchOutcome::Blocked.is_keystroke());
    }
}
