use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::TFAM_API;
use crate::normalize::{DateNormalizer, DateResolution};

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2})").expect("valid regex"));

/// Taipei Fine Arts Museum mixes the run dates with opening hours, e.g.
/// `2025/11/01 - 2026/03/29 09:30-17:30`, so dates are searched for
/// instead of split out.
pub struct TfamDates;

impl DateNormalizer for TfamDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_extracted(raw, &SLASH_DATE)
    }

    fn source_id(&self) -> &str {
        TFAM_API
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_with_opening_hours() {
        let r = TfamDates.normalize("2025/11/01 - 2026/03/29\n09:30-17:30");
        assert_eq!(r.start_date_string().as_deref(), Some("2025-11-01"));
        assert_eq!(r.end_date_string().as_deref(), Some("2026-03-29"));
        assert!(!r.is_permanent());
    }

    #[test]
    fn test_single_slash_date() {
        let r = TfamDates.normalize("2024/7/1（二）起");
        assert_eq!(r.start_date_string().as_deref(), Some("2024-07-01"));
        assert_eq!(r.end_date(), None);
        assert!(r.is_permanent());
    }

    #[test]
    fn test_extra_dates_are_ignored() {
        let r = TfamDates.normalize("2025/01/18 - 2025/12/21（2025/06/01 休館）");
        assert_eq!(r.end_date_string().as_deref(), Some("2025-12-21"));
    }

    #[test]
    fn test_time_only_is_unresolved() {
        assert_eq!(TfamDates.normalize("09:30-17:30"), DateResolution::unresolved());
    }

    #[test]
    fn test_slice_of_longer_number_is_not_a_date() {
        assert_eq!(TfamDates.normalize("2025/11/011"), DateResolution::unresolved());
        assert_eq!(TfamDates.normalize("12025/11/01"), DateResolution::unresolved());

        let r = TfamDates.normalize("2025/11/01-2026/03/290");
        assert_eq!(r.start_date_string().as_deref(), Some("2025-11-01"));
        assert_eq!(r.end_date(), None);
    }
}
