use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::app_dirs::AppDirs;

/// Routes `log` output to a file, since the terminal belongs to the TUI.
/// Filtering follows `RUST_LOG` and defaults to `warn`.
pub fn init() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Err(e) = init_with_path(&path) {
        // Nothing is listening yet, so stderr is the only place left
        eprintln!("devtype: logging disabled ({}: {e})", path.display());
    }
}

pub fn init_with_path(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // A logger may already be installed (tests); keep the first one
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
