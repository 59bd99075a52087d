pub mod auth;
pub mod config;
pub mod dashboard;
pub mod log;
pub mod predict;

use safebite_core::{AppState, FileStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the journal in the data directory.
pub fn open_state() -> Result<AppState<FileStore>, Box<dyn std::error::Error>> {
    Ok(AppState::load(FileStore::open()?))
}

/// Open the journal, failing unless someone is signed in.
pub fn open_signed_in() -> Result<AppState<FileStore>, Box<dyn std::error::Error>> {
    let state = open_state()?;
    state.require_user()?;
    Ok(state)
}
