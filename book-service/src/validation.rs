//! Field-level validation with error accumulation
//!
//! A [`ValidationSet`] collects every rule violation found during a single
//! validation pass instead of stopping at the first one, so a caller can
//! report all problems with a request at once.
//!
//! # Example
//!
//! ```rust
//! use book_service::validation::{unique, ValidationSet};
//!
//! let genres = vec!["drama".to_string(), "drama".to_string()];
//!
//! let mut v = ValidationSet::new();
//! v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
//! v.check(unique(&genres), "genres", "must not contain duplicate values");
//!
//! assert!(!v.is_valid());
//! assert_eq!(v.get("genres"), Some("must not contain duplicate values"));
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{Error, Result};

/// Field name to message map produced by a failed validation pass
pub type FieldErrors = BTreeMap<String, String>;

/// Request-scoped accumulator of field validation failures
///
/// Only the first failure recorded for a field is kept; later failures for the
/// same field are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationSet {
    errors: FieldErrors,
}

impl ValidationSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no failure has been recorded
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `field` unless the field already has a failure
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record a failure for `field` when `ok` is false
    pub fn check(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Message recorded for `field`, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// All recorded failures, ordered by field name
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Number of fields with a recorded failure
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no failure has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the set, returning the recorded failures
    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// `Ok(())` when valid, otherwise a validation error carrying every failure
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}

/// True when `value` equals one of `permitted`
pub fn permitted_value<T: AsRef<str>>(value: &str, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p.as_ref() == value)
}

/// True when no two items are equal (case-sensitive)
pub fn unique<T: AsRef<str>>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(item.as_ref()))
}
