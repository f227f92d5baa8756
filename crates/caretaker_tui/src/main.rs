//! Virtual Plant Caretaker entry point.
//!
//! # Responsibility
//! - Resolve config, start file logging, load plant data.
//! - Own terminal setup/teardown around the app loop.

use caretaker_core::{init_logging, CareService, JsonFileRepository};
use caretaker_tui::{App, AppConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::resolve()?;

    // The terminal belongs to the UI, so a logging failure is only shown in the footer.
    let log_session = init_logging(config.log_level, &config.log_dir);
    let status_note = log_session
        .as_ref()
        .err()
        .map(|err| format!("File logging disabled: {err}"));

    let (service, load_notice) = CareService::open(JsonFileRepository::new(&config.data_file));
    let mut app = App::new(service, load_notice).with_status_note(status_note);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
