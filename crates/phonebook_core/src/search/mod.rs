//! Directory search entry points.
//!
//! # See also
//! - `matcher` for the key/value matching rules.

pub mod matcher;
