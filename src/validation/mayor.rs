use chrono::NaiveDate;

use crate::error::AppError;

/// A term ends after it starts and lasts at most eight years (re-election
/// included).
pub fn validate_term(term_start: NaiveDate, term_end: NaiveDate) -> Result<(), AppError> {
    if term_end <= term_start {
        return Err(AppError::validation("Term end must be after term start"));
    }
    if (term_end - term_start).num_days() > 8 * 366 {
        return Err(AppError::validation("Term cannot be longer than eight years"));
    }
    Ok(())
}

/// Whether two terms share at least one day.
pub fn terms_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_term_validation() {
        assert!(validate_term(d("2025-01-01"), d("2028-12-31")).is_ok());
        assert!(validate_term(d("2025-01-01"), d("2025-01-01")).is_err());
        assert!(validate_term(d("2028-12-31"), d("2025-01-01")).is_err());
        assert!(validate_term(d("2025-01-01"), d("2035-01-01")).is_err());
    }

    #[test]
    fn test_overlap() {
        let current = (d("2025-01-01"), d("2028-12-31"));
        assert!(terms_overlap(current, (d("2028-12-31"), d("2032-12-31"))));
        assert!(!terms_overlap(current, (d("2029-01-01"), d("2032-12-31"))));
        assert!(terms_overlap(current, (d("2021-01-01"), d("2025-01-01"))));
    }
}
