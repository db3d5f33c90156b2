use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::MOCA_API;
use crate::normalize::{DateNormalizer, DateResolution};

// Year and month run together: 202510.03
static COMPACT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})\.(\d{1,2})$").expect("valid regex"));

const SEPARATORS: &[&str] = &[" - ", "~", "～", "－", "-"];

/// MOCA Taipei prints `202510.03(五)` style dates, two of them joined by
/// the adapter with ` - `.
pub struct MocaDates;

impl MocaDates {
    fn parse_token(token: &str) -> Option<NaiveDate> {
        let cleaned = DateTokenUtils::digits_and_dots(token);
        DateTokenUtils::captured_ymd(&COMPACT_DATE, &cleaned)
    }
}

impl DateNormalizer for MocaDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_range(raw, SEPARATORS, Self::parse_token)
    }

    fn source_id(&self) -> &str {
        MOCA_API
    }
}
