//! Interactive phone directory.
//!
//! # Responsibility
//! - Resolve fixed locations, start logging and load the directory.
//! - Hand stdin/stdout to the command loop.
//!
//! # Invariants
//! - A directory file that cannot be loaded aborts startup with exit code 1;
//!   it is never replaced with an empty directory.

mod console;
mod menu;
mod session;

use console::Console;
use log::{error, info};
use phonebook_core::{
    core_version, init_logging, logging_status, DirectoryConfig, DirectoryService, JsonFileStore,
};
use session::Session;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match DirectoryConfig::from_working_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=logging_ready module=cli status=ok level={} log_dir={}",
            level,
            log_dir.display()
        );
    }

    let store = JsonFileStore::new(&config.storage_path);
    let service = match DirectoryService::open(store) {
        Ok(service) => service,
        Err(err) => {
            error!("event=startup module=cli status=error error_code={}", err.code());
            eprintln!("Не удалось загрузить справочник: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=startup module=cli status=ok version={} records={}",
        core_version(),
        service.directory().len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(service, Console::new(stdin.lock(), stdout.lock()));
    if let Err(err) = session.run() {
        error!("event=session module=cli status=error error={err}");
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    info!("event=shutdown module=cli status=ok");
    ExitCode::SUCCESS
}
