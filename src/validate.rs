//! Boundary validation for query parameters.
//!
//! The server and the CLI run the same checks before calling the query
//! engines, so both reject the same inputs with the same messages.

use crate::models::{PhotoListQuery, PhotoSearchQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::query::gallery::parse_date;

/// Minimum and maximum length of a gallery search term, in characters.
pub const SEARCH_TERM_MIN_CHARS: usize = 3;
pub const SEARCH_TERM_MAX_CHARS: usize = 50;

/// A rejected request parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Parse an optional integer parameter supplied as text.
pub fn parse_int(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::new(field, format!("{field} must be an integer"))),
    }
}

/// Parse an optional floating-point parameter supplied as text.
pub fn parse_float(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, ValidationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
            _ => Err(ValidationError::new(field, format!("{field} must be a number"))),
        },
    }
}

/// A positive resource id.
pub fn resource_id(field: &'static str, raw: i64) -> Result<u32, ValidationError> {
    positive(field, raw)
}

/// Page number (default 1) and page size (default and maximum 30).
pub fn page_params(
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<(usize, usize), ValidationError> {
    let page = match page {
        Some(page) => positive("page", page)? as usize,
        None => 1,
    };

    let page_size = match page_size {
        Some(size) => positive("pageSize", size)? as usize,
        None => DEFAULT_PAGE_SIZE,
    };

    if page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::new(
            "pageSize",
            format!("pageSize must be at most {MAX_PAGE_SIZE}"),
        ));
    }

    Ok((page, page_size))
}

pub fn photo_list_query(
    category_id: Option<i64>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<PhotoListQuery, ValidationError> {
    let category_id = category_id
        .map(|id| positive("categoryId", id))
        .transpose()?;
    let (page, page_size) = page_params(page, page_size)?;

    Ok(PhotoListQuery {
        category_id,
        page,
        page_size,
    })
}

pub fn photo_search_query(
    search_term: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<PhotoSearchQuery, ValidationError> {
    if let Some(term) = &search_term {
        let chars = term.chars().count();
        if !(SEARCH_TERM_MIN_CHARS..=SEARCH_TERM_MAX_CHARS).contains(&chars) {
            return Err(ValidationError::new(
                "searchTerm",
                format!(
                    "searchTerm must be between {SEARCH_TERM_MIN_CHARS} and {SEARCH_TERM_MAX_CHARS} characters"
                ),
            ));
        }
    }

    let start = start_date
        .as_deref()
        .map(|value| date("startDate", value))
        .transpose()?;
    let end = end_date
        .as_deref()
        .map(|value| date("endDate", value))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ValidationError::new(
                "endDate",
                "End date cannot be before start date",
            ));
        }
    }

    let (page, page_size) = page_params(page, page_size)?;

    Ok(PhotoSearchQuery {
        search_term,
        start_date,
        end_date,
        page,
        page_size,
    })
}

fn positive(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ValidationError::new(field, format!("{field} must be a positive integer")))
}

fn date(field: &'static str, value: &str) -> Result<time::Date, ValidationError> {
    parse_date(value).ok_or_else(|| {
        ValidationError::new(field, format!("{field} must be a date in YYYY-MM-DD format"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_default_to_first_page_of_thirty() {
        assert_eq!(page_params(None, None), Ok((1, 30)));
        assert_eq!(page_params(Some(3), Some(10)), Ok((3, 10)));
    }

    #[test]
    fn page_params_reject_out_of_range_values() {
        assert_eq!(page_params(Some(0), None).unwrap_err().field, "page");
        assert_eq!(page_params(Some(-2), None).unwrap_err().field, "page");
        assert_eq!(page_params(None, Some(0)).unwrap_err().field, "pageSize");
        assert_eq!(page_params(None, Some(31)).unwrap_err().field, "pageSize");
        assert!(page_params(None, Some(30)).is_ok());
    }

    #[test]
    fn category_id_must_be_positive() {
        assert_eq!(
            photo_list_query(Some(2), None, None).unwrap().category_id,
            Some(2)
        );
        assert!(photo_list_query(Some(0), None, None).is_err());
        assert!(photo_list_query(Some(i64::MAX), None, None).is_err());
    }

    #[test]
    fn search_term_length_is_counted_in_characters() {
        assert!(photo_search_query(Some("ab".into()), None, None, None, None).is_err());
        assert!(photo_search_query(Some("são".into()), None, None, None, None).is_ok());
        assert!(photo_search_query(Some("a".repeat(50)), None, None, None, None).is_ok());
        assert!(photo_search_query(Some("a".repeat(51)), None, None, None, None).is_err());
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let err = photo_search_query(
            None,
            Some("2024-02-01".into()),
            Some("2024-01-31".into()),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "End date cannot be before start date");

        let same_day = photo_search_query(
            None,
            Some("2024-02-01".into()),
            Some("2024-02-01".into()),
            None,
            None,
        );
        assert!(same_day.is_ok());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let err = photo_search_query(None, Some("01/02/2024".into()), None, None, None)
            .unwrap_err();
        assert_eq!(err.field, "startDate");
    }

    #[test]
    fn text_parameters_are_parsed() {
        assert_eq!(parse_int("page", Some(" 2 ")), Ok(Some(2)));
        assert_eq!(parse_int("page", Some("")), Ok(None));
        assert_eq!(parse_int("page", None), Ok(None));
        assert!(parse_int("page", Some("two")).is_err());

        assert_eq!(parse_float("latitude", Some("-23.5")), Ok(Some(-23.5)));
        assert!(parse_float("latitude", Some("NaN")).is_err());
        assert!(parse_float("latitude", Some("north")).is_err());
    }

    #[test]
    fn resource_ids_must_be_positive() {
        assert_eq!(resource_id("id", 7), Ok(7));
        assert!(resource_id("id", 0).is_err());
        assert!(resource_id("id", -1).is_err());
    }
}
