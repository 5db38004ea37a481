//! Core logic for the phone directory tool.
//! This crate owns record invariants, persistence and search rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use config::{default_log_level, ConfigError, DirectoryConfig, DIRECTORY_FILE_NAME};
pub use logging::{init_logging, logging_status};
pub use model::directory::Directory;
pub use model::record::{Record, RecordField, RecordId};
pub use model::validation::{
    calculate_age, calculate_age_on, normalize_birth_date, normalize_name, validate_date,
    validate_phone, ValidationError, DATE_FORMAT_HINT,
};
pub use search::matcher::search_records;
pub use service::directory_service::{DirectoryError, DirectoryResult, DirectoryService};
pub use store::{DirectoryStore, JsonFileStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
