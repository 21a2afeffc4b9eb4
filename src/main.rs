//! Binary entry point: read configuration, bring up logging, open the
//! database, and drive the menu on stdin/stdout until the user exits.
use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use student_records::{logging, Config, Shell, StudentStore};

/// Failing to open the database aborts startup with a non-zero exit code.
/// Everything after that point is reported inside the menu loop.
fn main() -> Result<()> {
    let config = Config::load();
    logging::init(&config.log_level);

    let path = config.database_path()?;
    tracing::info!(path = %path.display(), "opening student database");
    let store = StudentStore::open(&path)
        .with_context(|| format!("failed to connect to the database at {}", path.display()))?;

    let stdout = io::stdout();
    let colored = !config.plain && stdout.is_terminal();
    let mut shell = Shell::new(&store, io::stdin().lock(), stdout.lock()).colored(colored);
    shell.run()?;
    drop(shell);

    store.close().context("failed to close the database")
}
