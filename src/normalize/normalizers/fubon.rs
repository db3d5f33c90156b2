use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::FUBON_API;
use crate::normalize::{DateNormalizer, DateResolution};

static DOT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})\.(\d{1,2})\.(\d{1,2})$").expect("valid regex"));

const SEPARATORS: &[&str] = &["~", "-"];

/// Fubon Art Museum: `2025.10.23 - 2026.4.20`
pub struct FubonDates;

impl FubonDates {
    fn parse_token(token: &str) -> Option<NaiveDate> {
        let cleaned = DateTokenUtils::digits_and_dots(token);
        DateTokenUtils::captured_ymd(&DOT_DATE, &cleaned)
    }
}

impl DateNormalizer for FubonDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_range(raw, SEPARATORS, Self::parse_token)
    }

    fn source_id(&self) -> &str {
        FUBON_API
    }
}
