//! Query string parameters for the book listing
//!
//! Every parameter is taken as raw text and converted here, so that a
//! malformed number is reported as a field error alongside any other
//! failure instead of rejecting the whole request at extraction. When a key
//! repeats, its first occurrence is used; unknown keys are ignored.
//!
//! # Example
//!
//! ```rust
//! use book_service::handlers::ListBooksParams;
//! use book_service::validation::ValidationSet;
//!
//! let params = ListBooksParams {
//!     title: Some("dune".into()),
//!     genres: Some("sci-fi, classic".into()),
//!     page: Some("2".into()),
//!     page_size: None,
//!     sort: Some("-year".into()),
//! };
//!
//! let mut v = ValidationSet::new();
//! let (criteria, spec) = params.into_parts(&mut v);
//!
//! assert!(v.is_valid());
//! assert_eq!(criteria.genres, vec!["classic".to_string(), "sci-fi".to_string()]);
//! assert_eq!(spec.page, 2);
//! assert_eq!(spec.page_size, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::repository::{
    ListQuerySpec, SearchCriteria, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT,
};
use crate::service::BOOK_SORT_SAFELIST;
use crate::validation::ValidationSet;

/// Raw query parameters of `GET /v1/books`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBooksParams {
    /// Free-text title filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Comma-separated genres every result must carry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,

    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,

    /// Sort key, `-` prefix for descending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ListBooksParams {
    /// Parameters from decoded query pairs, keeping the first value per key
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "title" => &mut params.title,
                "genres" => &mut params.genres,
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                "sort" => &mut params.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Split into search criteria and an unvalidated list spec
    ///
    /// Numbers that fail to parse are recorded in `v` under their parameter
    /// name and replaced by their defaults.
    pub fn into_parts(self, v: &mut ValidationSet) -> (SearchCriteria, ListQuerySpec) {
        let criteria = SearchCriteria::new(
            read_string(self.title, ""),
            read_csv(self.genres.as_deref()),
        );

        let spec = ListQuerySpec::new(BOOK_SORT_SAFELIST)
            .with_page(read_int(self.page.as_deref(), "page", DEFAULT_PAGE, v))
            .with_page_size(read_int(
                self.page_size.as_deref(),
                "page_size",
                DEFAULT_PAGE_SIZE,
                v,
            ))
            .with_sort(read_string(self.sort, DEFAULT_SORT));

        (criteria, spec)
    }
}

/// The value, or `default` when absent or empty
fn read_string(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

/// Comma-separated values, trimmed, with blanks dropped
fn read_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The value as an integer, or `default` when absent or empty
///
/// A value that is not an integer records a failure under `field` and also
/// yields `default`.
fn read_int(value: Option<&str>, field: &str, default: i64, v: &mut ValidationSet) -> i64 {
    match value {
        None | Some("") => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            v.add_error(field, "must be an integer value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let mut v = ValidationSet::new();
        let (criteria, spec) = ListBooksParams::default().into_parts(&mut v);

        assert!(v.is_valid());
        assert!(criteria.is_unfiltered());
        assert_eq!(spec.page, DEFAULT_PAGE);
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(spec.sort, DEFAULT_SORT);
        assert_eq!(spec.sort_safelist.len(), BOOK_SORT_SAFELIST.len());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let params = ListBooksParams {
            title: Some(String::new()),
            genres: Some(String::new()),
            page: Some(String::new()),
            page_size: Some(String::new()),
            sort: Some(String::new()),
        };
        let mut v = ValidationSet::new();
        let (criteria, spec) = params.into_parts(&mut v);

        assert!(v.is_valid());
        assert!(criteria.is_unfiltered());
        assert_eq!(spec.sort, "id");
    }

    #[test]
    fn test_bad_integers_are_field_errors() {
        let params = ListBooksParams {
            page: Some("two".into()),
            page_size: Some("1.5".into()),
            ..Default::default()
        };
        let mut v = ValidationSet::new();
        let (_, spec) = params.into_parts(&mut v);

        assert_eq!(v.get("page"), Some("must be an integer value"));
        assert_eq!(v.get("page_size"), Some("must be an integer value"));
        assert_eq!(spec.page, DEFAULT_PAGE);
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_negative_integers_parse() {
        let params = ListBooksParams {
            page: Some("-3".into()),
            ..Default::default()
        };
        let mut v = ValidationSet::new();
        let (_, spec) = params.into_parts(&mut v);

        assert!(v.is_valid());
        assert_eq!(spec.page, -3);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_value_wins_for_repeated_keys() {
        let params = ListBooksParams::from_pairs(pairs(&[
            ("page", "1"),
            ("sort", "-year"),
            ("page", "2"),
            ("sort", "title"),
            ("rating", "5"),
        ]));

        assert_eq!(
            params,
            ListBooksParams {
                page: Some("1".into()),
                sort: Some("-year".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_repeated_bad_value_is_still_reported() {
        let params = ListBooksParams::from_pairs(pairs(&[("page_size", "ten"), ("page_size", "10")]));
        let mut v = ValidationSet::new();
        let (_, spec) = params.into_parts(&mut v);

        assert_eq!(v.get("page_size"), Some("must be an integer value"));
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_read_csv_trims_and_drops_blanks() {
        assert_eq!(read_csv(Some(" sci-fi ,, drama,")), vec!["sci-fi", "drama"]);
        assert!(read_csv(Some(" , ")).is_empty());
        assert!(read_csv(None).is_empty());
    }
}
