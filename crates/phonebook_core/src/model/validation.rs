//! Field normalization and validation rules.
//!
//! # Responsibility
//! - Normalize raw console input into stored field values.
//! - Reject names, phones and dates that break record invariants.
//! - Compute age in whole years from a stored birth date.
//!
//! # Invariants
//! - `normalize_name` is idempotent for accepted input.
//! - `validate_phone` returns the normalized (`8`-prefixed) form.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Birth-date text format shown to users.
pub const DATE_FORMAT_HINT: &str = "дд.мм.гггг";
/// Earliest accepted birth year.
const MIN_YEAR: i32 = 1;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("valid phone regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{4})$").expect("valid date regex")
});

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is blank after trimming.
    EmptyName,
    /// Name contains characters other than letters, digits and whitespace.
    InvalidName(String),
    /// Phone is not 11 digits after `+7` normalization.
    InvalidPhone(String),
    /// Date is not a real `DD.MM.YYYY` calendar date.
    InvalidDate(String),
    /// Age was requested for a record without a birth date.
    MissingBirthDate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Имя и фамилия не могут быть пустыми."),
            Self::InvalidName(_) => write!(
                f,
                "Имя и фамилия могут содержать только буквы, цифры и пробелы."
            ),
            Self::InvalidPhone(_) => write!(f, "Неверный формат номера телефона."),
            Self::InvalidDate(_) => write!(f, "Неверный формат даты рождения."),
            Self::MissingBirthDate => write!(f, "Дата рождения не указана."),
        }
    }
}

impl Error for ValidationError {}

/// Trims and title-cases a name.
///
/// Title case uppercases every letter that does not follow another letter
/// and lowercases the rest, so `"o2neil"` becomes `"O2Neil"`.
pub fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let name = title_case(trimmed);
    if !name.chars().all(|ch| ch.is_alphanumeric() || ch.is_whitespace()) {
        return Err(ValidationError::InvalidName(name));
    }
    Ok(name)
}

/// Validates a phone and returns its stored form.
pub fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let phone = match trimmed.strip_prefix("+7") {
        Some(rest) => format!("8{rest}"),
        None => trimmed.to_string(),
    };

    if PHONE_RE.is_match(&phone) {
        Ok(phone)
    } else {
        Err(ValidationError::InvalidPhone(trimmed.to_string()))
    }
}

/// Parses `D.M.YYYY` / `DD.MM.YYYY` into a calendar date.
pub fn validate_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidDate(trimmed.to_string());

    let captures = DATE_RE.captures(trimmed).ok_or_else(invalid)?;
    let day: u32 = captures[1].parse().map_err(|_| invalid())?;
    let month: u32 = captures[2].parse().map_err(|_| invalid())?;
    let year: i32 = captures[3].parse().map_err(|_| invalid())?;
    if year < MIN_YEAR {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Normalizes optional birth-date input; blank input means "not set".
pub fn normalize_birth_date(raw: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    validate_date(trimmed)?;
    Ok(Some(trimmed.to_string()))
}

/// Whole years between `birth_date` and today's local date.
pub fn calculate_age(birth_date: Option<&str>) -> Result<i32, ValidationError> {
    calculate_age_on(birth_date, Local::now().date_naive())
}

/// Whole years between `birth_date` and `today`.
///
/// The naive year difference is reduced by one while this year's birthday
/// is still ahead.
pub fn calculate_age_on(
    birth_date: Option<&str>,
    today: NaiveDate,
) -> Result<i32, ValidationError> {
    let raw = birth_date
        .filter(|value| !value.trim().is_empty())
        .ok_or(ValidationError::MissingBirthDate)?;
    let born = validate_date(raw)?;

    let birthday_pending = (today.month(), today.day()) < (born.month(), born.day());
    Ok(today.year() - born.year() - i32::from(birthday_pending))
}

fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut after_letter = false;
    for ch in value.chars() {
        if after_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        after_letter = ch.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{normalize_birth_date, title_case, validate_phone, ValidationError};

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("mary ann"), "Mary Ann");
        assert_eq!(title_case("o2neil"), "O2Neil");
        assert_eq!(title_case("мАРИЯ"), "Мария");
    }

    #[test]
    fn phone_error_keeps_trimmed_input() {
        let err = validate_phone(" 12345 ").expect_err("short phone must fail");
        assert_eq!(err, ValidationError::InvalidPhone("12345".to_string()));
    }

    #[test]
    fn blank_birth_date_is_unset() {
        assert_eq!(normalize_birth_date("   "), Ok(None));
        assert_eq!(
            normalize_birth_date(" 01.02.2000 "),
            Ok(Some("01.02.2000".to_string()))
        );
    }
}
