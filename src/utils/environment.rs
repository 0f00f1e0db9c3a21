use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::history::HISTORY_FILENAME;

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "MEDIVOICE_DATA_DIR";

/// Get the directory holding persisted state: the `MEDIVOICE_DATA_DIR`
/// override if set, otherwise `<platform data dir>/medivoice-transcript`.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join("medivoice-transcript"))
}

/// Default location of the call history file.
pub fn default_history_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(HISTORY_FILENAME))
}
