//! Contact directory domain model.
//!
//! # Responsibility
//! - Define the persisted contact record and the directory mapping.
//! - Own the input normalization and validation rules for record fields.
//!
//! # Invariants
//! - A directory key is built as `first_name + "_" + last_name` at insert time.
//! - Stored phones are exactly 11 ASCII digits.
//! - Stored birth dates, when present, are real calendar dates in `DD.MM.YYYY`.

pub mod directory;
pub mod record;
pub mod validation;
