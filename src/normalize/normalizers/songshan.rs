use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::{DateTokenUtils, RANGE_SEPARATORS};
use crate::constants::SONGSHAN_API;
use crate::normalize::{DateNormalizer, DateResolution};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"));

/// Songshan Cultural Park writes `2025-11-01 - 2025-11-30`.
/// The spaced dash is the range separator; bare dashes belong to the dates.
pub struct SongshanDates;

impl SongshanDates {
    fn parse_token(token: &str) -> Option<NaiveDate> {
        DateTokenUtils::captured_ymd(&ISO_DATE, token)
    }
}

impl DateNormalizer for SongshanDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_range(raw, RANGE_SEPARATORS, Self::parse_token)
    }

    fn source_id(&self) -> &str {
        SONGSHAN_API
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_range() {
        let r = SongshanDates.normalize("2025-11-01 - 2025-11-30");
        assert_eq!(r, DateResolution::from_bounds(date(2025, 11, 1), date(2025, 11, 30)));
        assert!(!r.is_permanent());
    }

    #[test]
    fn test_single_date_is_open_ended() {
        let r = SongshanDates.normalize("2025-12-11");
        assert_eq!(r.start_date_string().as_deref(), Some("2025-12-11"));
        assert_eq!(r.end_date(), None);
        assert!(r.is_permanent());
    }

    #[test]
    fn test_unpadded_components_are_padded() {
        let r = SongshanDates.normalize("2025-1-5 - 2025-2-9");
        assert_eq!(r.start_date_string().as_deref(), Some("2025-01-05"));
        assert_eq!(r.end_date_string().as_deref(), Some("2025-02-09"));
    }

    #[test]
    fn test_bad_end_keeps_start_only() {
        let r = SongshanDates.normalize("2025-11-01 - 即日起");
        assert_eq!(r, DateResolution::from_bounds(date(2025, 11, 1), None));
    }

    #[test]
    fn test_invalid_start_is_unresolved() {
        assert_eq!(
            SongshanDates.normalize("2025-13-01 - 2025-11-30"),
            DateResolution::unresolved()
        );
    }

    #[test]
    fn test_overlong_components_are_rejected() {
        assert_eq!(SongshanDates.normalize("2025-10-100"), DateResolution::unresolved());
        assert_eq!(SongshanDates.normalize("12025-01-01"), DateResolution::unresolved());
        assert_eq!(
            SongshanDates.normalize("2025-11-01 - 2025-11-300"),
            DateResolution::from_bounds(date(2025, 11, 1), None)
        );
    }
}
