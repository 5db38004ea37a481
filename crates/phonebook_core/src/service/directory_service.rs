//! Directory use-case service.
//!
//! # Responsibility
//! - Own the loaded directory and the store it persists to.
//! - Provide add/delete/update/search/list/age entry points.
//!
//! # Invariants
//! - Every operation validates before it mutates.
//! - A mutation becomes visible in memory only after the store accepted it,
//!   so memory and storage never diverge after a failed save.
//! - Updating a name never re-keys the record.

use crate::model::directory::Directory;
use crate::model::record::{Record, RecordField, RecordId};
use crate::model::validation::{
    calculate_age_on, normalize_birth_date, normalize_name, validate_phone, ValidationError,
};
use crate::search::matcher::search_records;
use crate::store::{DirectoryStore, StoreError};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Operation-level failure reported back to the console.
#[derive(Debug)]
pub enum DirectoryError {
    Validation(ValidationError),
    /// Identifier already present on add.
    Duplicate(RecordId),
    /// Identifier missing on delete/update/age lookup.
    NotFound(RecordId),
    /// Update target is not a record field.
    InvalidField(String),
    Storage(StoreError),
}

impl DirectoryError {
    /// Stable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Duplicate(_) => "duplicate",
            Self::NotFound(_) => "not_found",
            Self::InvalidField(_) => "invalid_field",
            Self::Storage(_) => "storage",
        }
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(_) => write!(f, "Запись с таким именем уже существует."),
            Self::NotFound(_) => write!(f, "Запись не найдена."),
            Self::InvalidField(_) => write!(f, "Некорректное поле."),
            Self::Storage(err) => write!(f, "Ошибка хранилища: {err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for DirectoryError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Directory state plus the store it is persisted to.
pub struct DirectoryService<S: DirectoryStore> {
    store: S,
    directory: Directory,
}

impl<S: DirectoryStore> DirectoryService<S> {
    /// Loads the directory from `store`.
    ///
    /// Malformed storage is returned as `DirectoryError::Storage`; it is never
    /// replaced by an empty directory.
    pub fn open(store: S) -> DirectoryResult<Self> {
        let directory = store.load()?;
        Ok(Self { store, directory })
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// All records in directory order.
    pub fn list(&self) -> Vec<&Record> {
        self.directory.records().collect()
    }

    /// Returns whether a record exists for the normalized names.
    pub fn contains(&self, first_name: &str, last_name: &str) -> DirectoryResult<bool> {
        let id = identifier_for(first_name, last_name)?;
        Ok(self.directory.contains(&id))
    }

    /// Validates and inserts a new record, then persists.
    ///
    /// Checks run in console prompt order: names, duplicate, phone, date.
    pub fn add(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone: &str,
        birth_date: Option<&str>,
    ) -> DirectoryResult<RecordId> {
        let result = self.try_add(first_name, last_name, phone, birth_date);
        log_outcome("record_add", &result, self.directory.len());
        result
    }

    /// Removes a record by names, then persists.
    pub fn delete(&mut self, first_name: &str, last_name: &str) -> DirectoryResult<Record> {
        let result = self.try_delete(first_name, last_name);
        log_outcome("record_delete", &result, self.directory.len());
        result
    }

    /// Records whose key contains `query` or whose fields equal it.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let hits = search_records(&self.directory, query);
        info!(
            "event=record_search module=service status=ok hits={}",
            hits.len()
        );
        hits
    }

    /// Replaces one field of an existing record, then persists.
    ///
    /// `field` is parsed with [`RecordField`]'s `FromStr`. Renaming keeps the
    /// original directory key.
    pub fn update(
        &mut self,
        first_name: &str,
        last_name: &str,
        field: &str,
        new_value: &str,
    ) -> DirectoryResult<RecordField> {
        let result = self.try_update(first_name, last_name, field, new_value);
        if let Ok(field) = &result {
            info!(
                "event=record_update module=service status=ok field={}",
                field.as_str()
            );
        } else {
            log_outcome("record_update", &result, self.directory.len());
        }
        result
    }

    /// Age in whole years for the named record as of today.
    pub fn age_of(&self, first_name: &str, last_name: &str) -> DirectoryResult<i32> {
        self.age_of_on(first_name, last_name, Local::now().date_naive())
    }

    /// Age in whole years for the named record as of `today`.
    pub fn age_of_on(
        &self,
        first_name: &str,
        last_name: &str,
        today: NaiveDate,
    ) -> DirectoryResult<i32> {
        let id = identifier_for(first_name, last_name)?;
        let record = self
            .directory
            .get(&id)
            .ok_or(DirectoryError::NotFound(id))?;
        Ok(calculate_age_on(record.birth_date.as_deref(), today)?)
    }

    fn try_add(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone: &str,
        birth_date: Option<&str>,
    ) -> DirectoryResult<RecordId> {
        let first_name = normalize_name(first_name)?;
        let last_name = normalize_name(last_name)?;
        let id = RecordId::new(&first_name, &last_name);
        if self.directory.contains(&id) {
            return Err(DirectoryError::Duplicate(id));
        }

        let phone = validate_phone(phone)?;
        let birth_date = match birth_date {
            Some(raw) => normalize_birth_date(raw)?,
            None => None,
        };

        let mut next = self.directory.clone();
        next.insert(
            id.clone(),
            Record::new(first_name, last_name, phone, birth_date),
        );
        self.commit(next)?;
        Ok(id)
    }

    fn try_delete(&mut self, first_name: &str, last_name: &str) -> DirectoryResult<Record> {
        let id = identifier_for(first_name, last_name)?;
        let mut next = self.directory.clone();
        let removed = next.remove(&id).ok_or(DirectoryError::NotFound(id))?;
        self.commit(next)?;
        Ok(removed)
    }

    fn try_update(
        &mut self,
        first_name: &str,
        last_name: &str,
        field: &str,
        new_value: &str,
    ) -> DirectoryResult<RecordField> {
        let id = identifier_for(first_name, last_name)?;
        if !self.directory.contains(&id) {
            return Err(DirectoryError::NotFound(id));
        }
        let field: RecordField = field.parse().map_err(DirectoryError::InvalidField)?;

        let mut next = self.directory.clone();
        let record = next
            .get_mut(&id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;
        match field {
            RecordField::FirstName => record.first_name = normalize_name(new_value)?,
            RecordField::LastName => record.last_name = normalize_name(new_value)?,
            RecordField::Phone => record.phone = validate_phone(new_value)?,
            RecordField::BirthDate => record.birth_date = normalize_birth_date(new_value)?,
        }

        self.commit(next)?;
        Ok(field)
    }

    fn commit(&mut self, next: Directory) -> DirectoryResult<()> {
        self.store.save(&next)?;
        self.directory = next;
        Ok(())
    }
}

fn identifier_for(first_name: &str, last_name: &str) -> DirectoryResult<RecordId> {
    let first_name = normalize_name(first_name)?;
    let last_name = normalize_name(last_name)?;
    Ok(RecordId::new(&first_name, &last_name))
}

fn log_outcome<T>(event: &str, result: &DirectoryResult<T>, records: usize) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok records={records}"),
        Err(err) => warn!(
            "event={event} module=service status=error error_code={} records={records}",
            err.code()
        ),
    }
}
