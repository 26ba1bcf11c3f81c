//! Pagination and sort parameters for list queries
//!
//! ORDER BY cannot be sent as a bind parameter, so the sort key a client asks
//! for is only ever turned into SQL after it has been matched against a
//! safelist. [`ListQuerySpec`] holds the raw, untrusted request values;
//! [`ListQuerySpec::validate_into`] is the only way to obtain a
//! [`ValidatedListQuery`], and only that type exposes the sort column,
//! direction, limit and offset.
//!
//! # Example
//!
//! ```rust
//! use book_service::repository::{ListQuerySpec, SortDirection};
//! use book_service::validation::ValidationSet;
//!
//! let spec = ListQuerySpec::new(["id", "title", "year", "-id", "-title", "-year"])
//!     .with_page(3)
//!     .with_page_size(20)
//!     .with_sort("-year");
//!
//! let mut v = ValidationSet::new();
//! let query = spec.validate_into(&mut v).expect("valid spec");
//!
//! assert_eq!(query.sort_column(), "year");
//! assert_eq!(query.sort_direction(), SortDirection::Descending);
//! assert_eq!(query.limit(), 20);
//! assert_eq!(query.offset(), 40);
//! ```

use std::fmt;

use crate::validation::{permitted_value, ValidationSet};

/// Default page when the client does not ask for one
pub const DEFAULT_PAGE: i64 = 1;

/// Largest page number accepted
pub const MAX_PAGE: i64 = 10_000_000;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size accepted; larger requests fail validation
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default sort key
pub const DEFAULT_SORT: &str = "id";

/// Direction of the primary sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending
    #[default]
    Ascending,
    /// Descending (sort key carried a leading `-`)
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Untrusted pagination and sort parameters for one list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuerySpec {
    /// Requested page (1-indexed)
    pub page: i64,
    /// Requested records per page
    pub page_size: i64,
    /// Requested sort key, `-` prefix meaning descending
    pub sort: String,
    /// Every sort key the caller permits, signed variants included
    pub sort_safelist: Vec<String>,
}

impl ListQuerySpec {
    /// Spec with default page, page size and sort over the given safelist
    pub fn new<I, S>(sort_safelist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
            sort_safelist: sort_safelist.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the page number
    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the sort key
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Record a failure in `v` for every rule this spec breaks
    ///
    /// Failures go under `page`, `page_size` and `sort`.
    pub fn validate(&self, v: &mut ValidationSet) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );
        v.check(self.is_safelisted(), "sort", "invalid sort value");
    }

    /// Validate into `v`, returning the resolved query when this spec is valid
    ///
    /// Failures are recorded in `v` either way. `None` means at least one of
    /// this spec's own rules failed.
    pub fn validate_into(self, v: &mut ValidationSet) -> Option<ValidatedListQuery> {
        let mut own = ValidationSet::new();
        self.validate(&mut own);

        if !own.is_valid() {
            for (field, message) in own.into_errors() {
                v.add_error(field, message);
            }
            return None;
        }

        let (direction, column) = match self.sort.strip_prefix('-') {
            Some(column) => (SortDirection::Descending, column.to_string()),
            None => (SortDirection::Ascending, self.sort.clone()),
        };

        Some(ValidatedListQuery {
            page: self.page,
            page_size: self.page_size,
            sort_column: column,
            sort_direction: direction,
        })
    }

    fn is_safelisted(&self) -> bool {
        permitted_value(&self.sort, &self.sort_safelist)
    }
}

/// Pagination and sort parameters that passed validation
///
/// Only produced by [`ListQuerySpec::validate_into`], so the sort column is
/// always a safelist entry and page/page size are within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedListQuery {
    page: i64,
    page_size: i64,
    sort_column: String,
    sort_direction: SortDirection,
}

impl ValidatedListQuery {
    /// Sort key with any leading `-` removed
    #[must_use]
    pub fn sort_column(&self) -> &str {
        &self.sort_column
    }

    /// Direction of the primary sort
    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Maximum rows to return
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAFELIST: [&str; 6] = ["id", "title", "year", "-id", "-title", "-year"];

    fn spec() -> ListQuerySpec {
        ListQuerySpec::new(SAFELIST)
    }

    fn validated(spec: ListQuerySpec) -> ValidatedListQuery {
        let mut v = ValidationSet::new();
        let query = spec.validate_into(&mut v);
        assert!(v.is_valid(), "unexpected failures: {:?}", v.errors());
        query.unwrap()
    }

    fn failures(spec: ListQuerySpec) -> ValidationSet {
        let mut v = ValidationSet::new();
        assert!(spec.validate_into(&mut v).is_none());
        v
    }

    #[test]
    fn test_defaults() {
        let spec = spec();
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 20);
        assert_eq!(spec.sort, "id");

        let query = validated(spec);
        assert_eq!(query.sort_column(), "id");
        assert_eq!(query.sort_direction(), SortDirection::Ascending);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_limit_and_offset_across_bounds() {
        for page in [1, 2, 7, 500, MAX_PAGE] {
            for page_size in [1, 20, 99, 100] {
                let query = validated(spec().with_page(page).with_page_size(page_size));
                assert_eq!(query.limit(), page_size);
                assert_eq!(query.offset(), (page - 1) * page_size);
            }
        }
    }

    #[test]
    fn test_descending_sort_key() {
        let query = validated(spec().with_sort("-year"));
        assert_eq!(query.sort_column(), "year");
        assert_eq!(query.sort_direction(), SortDirection::Descending);
        assert_eq!(query.sort_direction().as_sql(), "DESC");
    }

    #[test]
    fn test_ascending_sort_key() {
        let query = validated(spec().with_sort("title"));
        assert_eq!(query.sort_column(), "title");
        assert_eq!(query.sort_direction().as_sql(), "ASC");
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(
            failures(spec().with_page_size(0)).get("page_size"),
            Some("must be greater than zero")
        );
        assert_eq!(
            failures(spec().with_page_size(101)).get("page_size"),
            Some("must be a maximum of 100")
        );
        validated(spec().with_page_size(1));
        validated(spec().with_page_size(100));
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(
            failures(spec().with_page(0)).get("page"),
            Some("must be greater than zero")
        );
        assert_eq!(
            failures(spec().with_page(-4)).get("page"),
            Some("must be greater than zero")
        );
        assert_eq!(
            failures(spec().with_page(MAX_PAGE + 1)).get("page"),
            Some("must be a maximum of 10 million")
        );
    }

    #[test]
    fn test_sort_outside_safelist_is_rejected() {
        for sort in [
            "name",
            "-name",
            "ID",
            "id; DROP TABLE books",
            "(SELECT 1)",
            "--id",
            "year desc",
            "",
        ] {
            let v = failures(spec().with_sort(sort));
            assert_eq!(v.get("sort"), Some("invalid sort value"), "sort = {sort:?}");
            assert!(!v.is_valid());
        }
    }

    #[test]
    fn test_signed_key_must_be_listed_verbatim() {
        // Only the ascending variant is permitted here
        let spec = ListQuerySpec::new(["id", "title"]).with_sort("-title");
        assert!(failures(spec).get("sort").is_some());
    }

    #[test]
    fn test_all_failures_reported_together() {
        let v = failures(spec().with_page(0).with_page_size(500).with_sort("price"));
        assert_eq!(v.len(), 3);
        assert!(v.get("page").is_some());
        assert!(v.get("page_size").is_some());
        assert!(v.get("sort").is_some());
    }

    #[test]
    fn test_validate_into_keeps_earlier_failures() {
        let mut v = ValidationSet::new();
        v.add_error("page", "must be an integer value");

        let query = spec().with_page(0).validate_into(&mut v);
        assert!(query.is_none());
        // The earlier parse failure is kept for the field
        assert_eq!(v.get("page"), Some("must be an integer value"));
    }

    #[test]
    fn test_validate_does_not_resolve() {
        let mut v = ValidationSet::new();
        spec().with_sort("-title").validate(&mut v);
        assert!(v.is_valid());
    }
}
