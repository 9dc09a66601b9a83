//! Holocron - character search over the Star Wars API
//!
//! A search box, a result list and a detail panel in the terminal, built on a
//! small core:
//!
//! - **Data Client**: one GET per search, every failure folded into a message
//! - **Debouncer**: turns keystrokes into settled queries
//! - **Result Cache**: successful pages keyed by normalized query
//! - **Orchestrator**: the idle/loading/success/empty/error state machine,
//!   with a staleness guard for overlapping fetches
//!
//! # Example
//!
//! ```no_run
//! use holocron::{SearchOrchestrator, SwapiClient, UiState};
//! use std::time::Duration;
//!
//! fn main() -> holocron::Result<()> {
//!     let mut orchestrator = SearchOrchestrator::new(SwapiClient::new()?);
//!
//!     orchestrator.handle_query("luke");
//!     orchestrator.wait_for_fetch(Duration::from_secs(30));
//!
//!     let state = orchestrator.state();
//!     if state.ui_state == UiState::Success {
//!         for c in &state.characters {
//!             println!("{} ({})", c.name, c.birth_year);
//!         }
//!     }
//!
//!     // Served from the cache, no second request
//!     orchestrator.handle_query("LUKE");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod tui;
pub mod view;

use std::path::PathBuf;
use std::time::Duration;

// Re-export main types
pub use cache::{normalize_key, ResultCache};
pub use client::{CharacterSource, SwapiClient, SWAPI_BASE};
pub use debounce::Debouncer;
pub use error::{FetchError, HolocronError, Result};
pub use model::{Character, SearchPage, SearchResult, SessionState, UiState};
pub use orchestrator::{FetchOutcome, SearchOrchestrator, UiEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Quiet period before a typed query is searched
    pub debounce: Duration,
    /// Log level (error, warn, info, debug, trace, off)
    pub log_level: String,
    /// Log file for the TUI; next to the executable when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce: debounce::DEFAULT_QUIET_PERIOD,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}
