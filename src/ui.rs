pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use devtype::{matcher::MatchOutcome, session::Snapshot, stats::SKIP_PENALTY};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

/// Row of boxed counters shown above the snippet
pub struct StatPanels<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> StatPanels<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }
}

impl Widget for StatPanels<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats = &self.snapshot.stats;
        let panels = [
            ("time", format!("{}s", self.snapshot.remaining_secs), Color::Blue),
            ("wpm", stats.wpm.to_string(), Color::Green),
            ("accuracy", format!("{}%", stats.accuracy), Color::Magenta),
            ("errors", stats.errors.to_string(), Color::Red),
            ("skips", stats.skips.to_string(), Color::Yellow),
        ];

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, panels.len() as u32); 5])
            .split(area);

        for ((title, value, color), chunk) in panels.into_iter().zip(chunks.iter()) {
            Paragraph::new(Span::styled(value, bold_style().fg(color)))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title))
                .render(*chunk, buf);
        }
    }
}

/// The active snippet with per-character highlighting
pub struct SnippetLine<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> SnippetLine<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Rows the snippet needs at the given width
    pub fn height(&self, width: u16) -> u16 {
        let width = width.max(1) as usize;
        self.snapshot.snippet.width().div_ceil(width).max(1) as u16
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let green_bold_style = bold_style().fg(Color::Green);
        let cursor_style = match self.snapshot.last_outcome {
            Some(MatchOutcome::Rejected) => bold_style()
                .fg(Color::Red)
                .add_modifier(Modifier::UNDERLINED),
            _ => bold_style()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        };

        self.snapshot
            .snippet
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                if idx < self.snapshot.cursor {
                    Span::styled(c.to_string(), green_bold_style)
                } else if idx == self.snapshot.cursor {
                    let shown = if c == ' ' { '·' } else { c };
                    Span::styled(shown.to_string(), cursor_style)
                } else {
                    Span::styled(c.to_string(), dim_bold_style())
                }
            })
            .collect()
    }
}

impl Widget for SnippetLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fits_on_one_line = self.snapshot.snippet.width() <= area.width as usize;
        Paragraph::new(Line::from(self.spans()))
            .alignment(if fits_on_one_line {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// The user's input buffer
pub struct InputLine<'a> {
    typed: &'a str,
}

impl<'a> InputLine<'a> {
    pub fn new(typed: &'a str) -> Self {
        Self { typed }
    }
}

impl Widget for InputLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(vec![
            Span::styled("> ", dim_bold_style()),
            Span::styled(self.typed, bold_style()),
            Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .render(area, buf);
    }
}

/// Start screen text
pub struct Welcome {
    duration_secs: u64,
}

impl Welcome {
    pub fn new(duration_secs: u64) -> Self {
        Self { duration_secs }
    }
}

impl Widget for Welcome {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                "devtype",
                bold_style().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(format!(
                "Type as many snippets as you can in {} seconds.",
                self.duration_secs
            )),
            Line::from("Programming terms, abbreviations and their full forms, and code fragments."),
            Line::from(format!(
                "Wrong keys are not entered. Skipping a snippet costs {SKIP_PENALTY} errors."
            )),
            Line::from(""),
            Line::from(Span::styled(
                "(enter) start / (esc) quit",
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Final statistics after a game
pub struct Results<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Results<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }
}

impl Widget for Results<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats = &self.snapshot.stats;
        let row = |label: &'static str, value: String, color: Color| {
            Line::from(vec![
                Span::styled(format!("{label:>14}  "), dim_bold_style()),
                Span::styled(value, bold_style().fg(color)),
            ])
        };

        let title = if self.snapshot.remaining_secs == 0 {
            "Time's up!"
        } else {
            "Game over"
        };

        let lines = vec![
            Line::from(Span::styled(title, bold_style().fg(Color::Green))),
            Line::from(""),
            row("final wpm", stats.wpm.to_string(), Color::Green),
            row("accuracy", format!("{}%", stats.accuracy), Color::Magenta),
            row("correct chars", stats.correct_chars.to_string(), Color::Blue),
            row("errors", stats.errors.to_string(), Color::Red),
            row("skips", stats.skips.to_string(), Color::Yellow),
            row("penalty", stats.penalty().to_string(), Color::Yellow),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// One line of key hints
pub struct Legend(pub &'static str);

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.0,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}
