pub mod app;
pub mod list;
pub mod search;
pub mod ui;

use crate::client::SwapiClient;
use crate::orchestrator::SearchOrchestrator;
use crate::AppConfig;
use tracing::info;

/// Entry point: take over the terminal and run the interactive search
pub fn run(config: &AppConfig) -> crate::Result<()> {
    let client = SwapiClient::new()?;
    let mut app = app::App::new(SearchOrchestrator::new(client), config.debounce);

    info!(debounce_ms = config.debounce.as_millis() as u64, "starting TUI");

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
