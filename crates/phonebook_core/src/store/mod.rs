//! Directory persistence port and file-backed implementation.
//!
//! # Responsibility
//! - Define the load/save contract the directory service depends on.
//! - Keep file format and I/O details out of the service layer.
//!
//! # Invariants
//! - `save` always writes the whole directory; there are no partial writes.
//! - `load` surfaces malformed contents as errors instead of resetting state.

use crate::model::directory::Directory;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure for directory load/save.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "ошибка доступа к файлу `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => write!(
                f,
                "файл справочника `{}` повреждён: {source}",
                path.display()
            ),
            Self::Encode(err) => write!(f, "не удалось сериализовать справочник: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Storage port for the whole directory.
pub trait DirectoryStore {
    /// Reads the full directory; an absent store yields an empty directory.
    fn load(&self) -> StoreResult<Directory>;
    /// Overwrites the store with `directory`.
    fn save(&self, directory: &Directory) -> StoreResult<()>;
}

impl<S: DirectoryStore + ?Sized> DirectoryStore for &S {
    fn load(&self) -> StoreResult<Directory> {
        (**self).load()
    }

    fn save(&self, directory: &Directory) -> StoreResult<()> {
        (**self).save(directory)
    }
}
