//! Pretty-printed JSON file store.
//!
//! # Invariants
//! - Output uses 4-space indentation and keeps non-ASCII text verbatim.
//! - File handles are scoped to a single load/save call.

use super::{DirectoryStore, StoreError, StoreResult};
use crate::model::directory::Directory;
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";

/// Directory store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn read_directory(&self) -> StoreResult<Directory> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Directory::new()),
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            if err.is_io() {
                StoreError::Io {
                    path: self.path.clone(),
                    source: err.into(),
                }
            } else {
                StoreError::Malformed {
                    path: self.path.clone(),
                    source: err,
                }
            }
        })
    }

    fn write_directory(&self, directory: &Directory) -> StoreResult<()> {
        let mut payload = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut payload,
            PrettyFormatter::with_indent(JSON_INDENT),
        );
        directory
            .serialize(&mut serializer)
            .map_err(StoreError::Encode)?;

        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&payload).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

impl DirectoryStore for JsonFileStore {
    fn load(&self) -> StoreResult<Directory> {
        let started_at = Instant::now();
        match self.read_directory() {
            Ok(directory) => {
                info!(
                    "event=directory_load module=store status=ok duration_ms={} records={}",
                    started_at.elapsed().as_millis(),
                    directory.len()
                );
                Ok(directory)
            }
            Err(err) => {
                error!(
                    "event=directory_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, directory: &Directory) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_directory(directory) {
            Ok(()) => {
                info!(
                    "event=directory_save module=store status=ok duration_ms={} records={}",
                    started_at.elapsed().as_millis(),
                    directory.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=directory_save module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
