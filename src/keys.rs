use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::matcher::SnippetCursor;
use crate::session::{Phase, SessionEvent};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Type(char),
    Backspace,
    Skip,
    Start,
    End,
    Quit,
}

impl Command {
    /// Translates the command into a session event against the active
    /// snippet. `Quit` is handled by the caller and has no session event.
    pub fn to_session_event(self, snippet: &SnippetCursor) -> Option<SessionEvent> {
        match self {
            Command::Type(c) => Some(SessionEvent::Input(snippet.appended(c))),
            Command::Backspace => Some(SessionEvent::Input(snippet.backspaced())),
            Command::Skip => Some(SessionEvent::Skip),
            Command::Start => Some(SessionEvent::Start),
            Command::End => Some(SessionEvent::End),
            Command::Quit => None,
        }
    }
}

/// Maps a terminal key event to a command for the given phase
pub fn map_key(phase: Phase, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match phase {
        Phase::Idle => match key.code {
            KeyCode::Enter => Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
        Phase::Running => match key.code {
            KeyCode::Esc => Some(Command::Skip),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char('e') if ctrl => Some(Command::End),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Command::Type(c))
            }
            _ => None,
        },
        Phase::Ended => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
    }
}
