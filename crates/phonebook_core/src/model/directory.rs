//! In-memory directory mapping.

use crate::model::record::{Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from identifier to record; the persisted unit of state.
///
/// Iteration follows key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    records: BTreeMap<String, Record>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id.as_str())
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.get(id.as_str())
    }

    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut Record> {
        self.records.get_mut(id.as_str())
    }

    /// Inserts or replaces the record stored under `id`.
    pub fn insert(&mut self, id: RecordId, record: Record) -> Option<Record> {
        self.records.insert(id.as_str().to_string(), record)
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        self.records.remove(id.as_str())
    }

    /// Iterates `(key, record)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }
}
