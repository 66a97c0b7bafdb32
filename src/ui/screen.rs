use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use devtype::session::{Phase, Snapshot};

use super::{
    InputLine, Legend, Results, SnippetLine, StatPanels, Welcome, HORIZONTAL_MARGIN,
    VERTICAL_MARGIN,
};

/// A UI Screen boundary: responsible for rendering one phase of the game
pub trait Screen {
    fn render(&self, snapshot: &Snapshot, f: &mut Frame);
}

/// Start screen
pub struct IdleScreen;

impl Screen for IdleScreen {
    fn render(&self, snapshot: &Snapshot, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(f.area());

        f.render_widget(Welcome::new(snapshot.remaining_secs), chunks[1]);
    }
}

/// Typing screen - counters, the snippet and the input buffer
pub struct RunningScreen;

impl Screen for RunningScreen {
    fn render(&self, snapshot: &Snapshot, f: &mut Frame) {
        let area = f.area();
        let snippet = SnippetLine::new(snapshot);
        let snippet_lines = snippet.height(area.width.saturating_sub(HORIZONTAL_MARGIN * 2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3), // counters
                Constraint::Min(0),
                Constraint::Length(snippet_lines),
                Constraint::Length(1), // padding
                Constraint::Length(3), // input
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        f.render_widget(StatPanels::new(snapshot), chunks[0]);
        f.render_widget(snippet, chunks[2]);
        f.render_widget(InputLine::new(&snapshot.typed), chunks[4]);
        f.render_widget(
            Legend("(esc) skip, +10 errors / (ctrl+e) end / (ctrl+c) quit"),
            chunks[6],
        );
    }
}

/// Results screen
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, snapshot: &Snapshot, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(f.area());

        f.render_widget(Results::new(snapshot), chunks[1]);
        f.render_widget(Legend("(r)etry / (q)uit"), chunks[3]);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(IdleScreen),
        Phase::Running => Box::new(RunningScreen),
        Phase::Ended => Box::new(ResultsScreen),
    }
}
