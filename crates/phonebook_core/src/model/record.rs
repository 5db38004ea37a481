//! Contact record and identifier types.
//!
//! # Responsibility
//! - Define the canonical record persisted in the directory file.
//! - Map record fields to the on-disk key names used by existing files.
//!
//! # Invariants
//! - `RecordId` is only built from already-normalized names.
//! - `birth_date = None` is persisted as explicit `null`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Composite directory key, `FirstName_LastName`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Builds the identifier from normalized first and last names.
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self(format!("{first_name}_{last_name}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One contact entry.
///
/// Field names on disk stay in the directory file's language so files written
/// by earlier versions of the tool load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Имя")]
    pub first_name: String,
    #[serde(rename = "Фамилия")]
    pub last_name: String,
    #[serde(rename = "Телефон")]
    pub phone: String,
    /// `DD.MM.YYYY`; a missing key loads as `None`.
    #[serde(rename = "Дата рождения", default)]
    pub birth_date: Option<String>,
}

impl Record {
    /// Creates a record from already-validated values.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        birth_date: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            birth_date,
        }
    }

    /// Identifier derived from the record's current names.
    ///
    /// After a rename this can differ from the key the record is stored
    /// under; the directory key is never rewritten on update.
    pub fn identifier(&self) -> RecordId {
        RecordId::new(&self.first_name, &self.last_name)
    }

    /// Returns `true` when `value` equals any stored field exactly.
    pub fn has_field_value(&self, value: &str) -> bool {
        self.first_name == value
            || self.last_name == value
            || self.phone == value
            || self.birth_date.as_deref() == Some(value)
    }

    /// Single-line rendering used by list and search output.
    pub fn display_line(&self) -> String {
        format!(
            "{} {} | Телефон: {} | Дата рождения: {}",
            self.first_name,
            self.last_name,
            self.phone,
            self.birth_date.as_deref().unwrap_or("Не указана")
        )
    }
}

/// Updatable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    FirstName,
    LastName,
    Phone,
    BirthDate,
}

impl RecordField {
    /// Stable metadata label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::BirthDate => "birth_date",
        }
    }
}

impl FromStr for RecordField {
    type Err = String;

    /// Accepts the menu labels case-insensitively, plus code identifiers.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "имя" | "firstname" | "first_name" => Ok(Self::FirstName),
            "фамилия" | "lastname" | "last_name" => Ok(Self::LastName),
            "телефон" | "phone" => Ok(Self::Phone),
            "дата рождения" | "birthdate" | "birth_date" => Ok(Self::BirthDate),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordField, RecordId};

    #[test]
    fn record_serializes_with_directory_file_keys() {
        let record = Record::new("Иван", "Петров", "89991234567", None);
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(value["Имя"], "Иван");
        assert_eq!(value["Фамилия"], "Петров");
        assert_eq!(value["Телефон"], "89991234567");
        assert!(value["Дата рождения"].is_null());
    }

    #[test]
    fn record_without_birth_date_key_loads_as_none() {
        let raw = r#"{"Имя":"A","Фамилия":"B","Телефон":"89990000000"}"#;
        let record: Record = serde_json::from_str(raw).expect("record should parse");
        assert_eq!(record.birth_date, None);
    }

    #[test]
    fn identifier_joins_names_with_underscore() {
        let record = Record::new("John", "Smith", "89991234567", None);
        assert_eq!(record.identifier(), RecordId::from("John_Smith"));
    }

    #[test]
    fn field_parsing_is_case_insensitive_for_menu_labels() {
        assert_eq!("Телефон".parse::<RecordField>(), Ok(RecordField::Phone));
        assert_eq!(
            " ДАТА РОЖДЕНИЯ ".parse::<RecordField>(),
            Ok(RecordField::BirthDate)
        );
        assert_eq!("firstName".parse::<RecordField>(), Ok(RecordField::FirstName));
        assert!("email".parse::<RecordField>().is_err());
    }

    #[test]
    fn display_line_marks_missing_birth_date() {
        let record = Record::new("John", "Smith", "89991234567", None);
        assert_eq!(
            record.display_line(),
            "John Smith | Телефон: 89991234567 | Дата рождения: Не указана"
        );
    }
}
