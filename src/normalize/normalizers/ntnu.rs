use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::NTNU_API;
use crate::normalize::{DateNormalizer, DateResolution};

// 2024/7/1, 2024.7.1 or 2024年7月1日
static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})\s*[/.年]\s*(\d{1,2})\s*[/.月]\s*(\d{1,2})").expect("valid regex")
});

/// NTNU Art Museum: the date is whatever follows `展覽時間：` on the
/// exhibition page, free text with weekday and opening hours mixed in.
pub struct NtnuDates;

impl DateNormalizer for NtnuDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        DateTokenUtils::resolve_extracted(raw, &FULL_DATE)
    }

    fn source_id(&self) -> &str {
        NTNU_API
    }
}
