mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use devtype::{
    config::{Config, ConfigStore, FileConfigStore},
    content::{Category, ContentError, ContentProvider, Corpus},
    keys::{map_key, Command},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TermEvent, TermEventSource, Ticker},
    session::{Session, Snapshot},
};

/// timed typing sprints over programming terms, abbreviations and code snippets
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing game for programmers. Type programming terms, abbreviations followed by their full forms, and code fragments against the clock."
)]
pub struct Cli {
    /// number of seconds each game lasts
    #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
    secs: Option<u64>,

    /// snippet category to draw from; repeat to combine (default: all)
    #[clap(short = 'c', long = "category", value_enum)]
    categories: Vec<Category>,

    /// JSON corpus to use instead of the built-in one
    #[clap(long)]
    corpus: Option<PathBuf>,

    /// timer poll interval in milliseconds
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..=1000))]
    tick_ms: Option<u64>,

    /// print the final stats as JSON on exit
    #[clap(long)]
    summary_json: bool,
}

impl Cli {
    /// Overlay the command line on top of the stored configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(secs) = self.secs {
            config.duration_secs = secs;
        }
        if !self.categories.is_empty() {
            config.categories = self.categories.clone();
        }
        if let Some(ref corpus) = self.corpus {
            config.corpus_path = Some(corpus.clone());
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: Session<ContentProvider>,
    pub snapshot: Snapshot,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ContentError> {
        let corpus = match config.corpus_path {
            Some(ref path) => Corpus::from_path(path)?,
            None => Corpus::embedded()?,
        };
        let provider = ContentProvider::new(corpus, &config.categories)?;
        let session = Session::new(provider, config.duration());
        let snapshot = session.snapshot();

        Ok(Self {
            config,
            session,
            snapshot,
        })
    }

    /// Applies a command; returns false when the app should exit
    pub fn apply(&mut self, command: Command) -> bool {
        match command.to_session_event(self.session.snippet()) {
            Some(event) => {
                self.snapshot = self.session.handle(event);
                true
            }
            None => false,
        }
    }

    pub fn on_tick(&mut self) {
        self.snapshot = self.session.tick();
    }

    /// One-line result of the last game, if one was played
    pub fn summary(&self) -> Option<String> {
        self.session.started_at()?;
        let stats = &self.snapshot.stats;
        Some(format!(
            "{} wpm   {}% acc   {} correct   {} errors   {} skips",
            stats.wpm, stats.accuracy, stats.correct_chars, stats.errors, stats.skips
        ))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init();

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply_to(&mut config);

    let mut app = match App::new(config.clone()) {
        Ok(app) => app,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };
    if let Err(e) = store.save(&config) {
        log::warn!("could not save config to {}: {e}", store.path().display());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(app.config.tick_rate()),
    );
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result?;

    if cli.summary_json {
        if app.session.started_at().is_some() {
            println!("{}", serde_json::to_string(&app.snapshot.stats)?);
        }
    } else if let Some(summary) = app.summary() {
        println!("{summary}");
    }

    Ok(())
}

fn start_tui<B: Backend, E: TermEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        // The poll timer only runs while a game is in progress
        runner.set_timer(app.session.is_running());
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            TermEvent::Tick => app.on_tick(),
            TermEvent::Resize => {}
            TermEvent::Key(key) => {
                if let Some(command) = map_key(app.snapshot.phase, key) {
                    if !app.apply(command) {
                        break;
                    }
                }
            }
            TermEvent::Closed => break,
        }
    }
    runner.disarm_timer();

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(app.snapshot.phase).render(&app.snapshot, f);
}
