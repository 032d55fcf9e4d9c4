//! studentdb - Student Record Manager
//!
//! A menu-driven command-line manager for student records. Records live in
//! a JSON collection under `student_management_system/` in the working
//! directory.

use env_logger::Env;
use log::error;
use std::io::{self, IsTerminal};
use std::process;
use studentdb::application::StudentRegistry;
use studentdb::infrastructure::{JsonFileStore, StoreConfig};
use studentdb::presentation::{Console, Menu};

/// Entry point for the student record manager.
///
/// Opens the record store at its fixed location and runs the menu loop
/// until the user exits or input ends. A store that cannot be opened ends
/// the process before the menu is shown.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read from or written to.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = StoreConfig::default();
    let store = match JsonFileStore::open(&config) {
        Ok(store) => store,
        Err(err) => {
            error!("store at {} unavailable: {err}", config.collection_path().display());
            println!("Could not connect to the record store: {err}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let console = Console::new(io::stdin().lock(), stdout.lock(), styled);

    let mut menu = Menu::new(StudentRegistry::new(store), console);
    menu.run()?;

    Ok(())
}
