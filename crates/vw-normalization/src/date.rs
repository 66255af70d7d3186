//! Date reformatting.
//!
//! State exports publish dates as `MM/DD/YYYY`; the warehouse stores
//! `YYYY-MM-DD`. Values shorter than a full date are suppressed or partial
//! and become null.

use chrono::NaiveDate;
use thiserror::Error;

/// Length of a canonical `YYYY-MM-DD` date.
pub const CANONICAL_DATE_LEN: usize = 10;

/// Published date format.
pub const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Stored date format.
pub const WAREHOUSE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a full-length value is not a published date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// `%Y` alone would accept a sign or a short year.
    #[error("year must be exactly four digits")]
    Year,
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Reformat a published date.
///
/// Returns `Ok(None)` when `raw` is shorter than a canonical date and an
/// error when a full-length value does not match `MM/DD/YYYY`. A value that
/// is already `YYYY-MM-DD` is rejected rather than passed through.
pub fn reformat_date(raw: &str) -> Result<Option<String>, DateError> {
    if raw.len() < CANONICAL_DATE_LEN {
        return Ok(None);
    }
    let year = raw.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Year);
    }
    let date = NaiveDate::parse_from_str(raw, EXPORT_DATE_FORMAT)?;
    Ok(Some(format_date(date)))
}

/// Format a date the way the warehouse stores it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(WAREHOUSE_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_become_none() {
        assert_eq!(reformat_date(""), Ok(None));
        assert_eq!(reformat_date("*"), Ok(None));
        assert_eq!(reformat_date("03/05/24"), Ok(None));
    }

    #[test]
    fn full_dates_are_reformatted() {
        assert_eq!(
            reformat_date("03/05/2024"),
            Ok(Some("2024-03-05".to_string()))
        );
        assert_eq!(
            reformat_date("12/31/1999"),
            Ok(Some("1999-12-31".to_string()))
        );
    }

    #[test]
    fn canonical_input_is_rejected() {
        assert!(reformat_date("2024-03-05").is_err());
        assert!(reformat_date("13/45/2024").is_err());
    }

    #[test]
    fn signed_or_odd_length_years_are_rejected() {
        assert_eq!(reformat_date("01/01/-2024"), Err(DateError::Year));
        assert_eq!(reformat_date("01/01/+2024"), Err(DateError::Year));
        assert_eq!(reformat_date("01/01/20245"), Err(DateError::Year));
        assert_eq!(reformat_date("1/1/+02024"), Err(DateError::Year));
    }
}
