use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::NPM_API;
use crate::normalize::{DateNormalizer, DateResolution};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"));

const SEPARATORS: &[&str] = &["~", "～"];

/// National Palace Museum: `2025-10-10~2026-01-07`, `2023-12-01~` for
/// open-ended shows and a literal `常設展` for the permanent galleries.
pub struct NpmDates;

impl NpmDates {
    fn parse_token(token: &str) -> Option<NaiveDate> {
        DateTokenUtils::captured_ymd(&ISO_DATE, token)
    }
}

impl DateNormalizer for NpmDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_range(raw, SEPARATORS, Self::parse_token)
    }

    fn source_id(&self) -> &str {
        NPM_API
    }
}
