use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::DateTokenUtils;
use crate::constants::HUASHAN_API;
use crate::normalize::{DateNormalizer, DateResolution};

// Optional year, then month and day: `11.15 Sat.`, `2025.11.15`, `11/15`
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(?:(\d{4})\s*[./-]\s*)?(\d{1,2})\s*[./-]\s*(\d{1,2})(?:\D|$)").expect("valid regex")
});

// A bare `-` is not a separator: it also separates year, month and day.
// The crawler joins the two card dates with " - ".
const SEPARATORS: &[&str] = &[" - ", "－", "–", "~", "～"];

/// Month/day with an optional explicit year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthDay {
    year: Option<i32>,
    month: u32,
    day: u32,
}

impl MonthDay {
    fn parse(token: &str) -> Option<Self> {
        let caps = MONTH_DAY.captures(token)?;
        let year = match caps.get(1) {
            Some(y) => Some(y.as_str().parse().ok()?),
            None => None,
        };
        Some(Self {
            year,
            month: caps.get(2)?.as_str().parse().ok()?,
            day: caps.get(3)?.as_str().parse().ok()?,
        })
    }

    fn on_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.unwrap_or(year), self.month, self.day)
    }
}

/// Huashan 1914 Creative Park lists `11.15 Sat.` / `03.29 Sun.` card dates
/// with no year. The year comes from a reference date; an end month that is
/// smaller than the start month means the run crosses into the next year.
pub struct HuashanDates {
    reference: NaiveDate,
}

impl HuashanDates {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    fn resolve(&self, left: &str, right: Option<&str>) -> DateResolution {
        let Some(start_md) = MonthDay::parse(left) else {
            return DateResolution::unresolved();
        };
        let base_year = start_md.year.unwrap_or(self.reference.year());
        let start = start_md.on_year(base_year);

        let end = right.and_then(MonthDay::parse).and_then(|end_md| {
            let year = if end_md.year.is_none() && end_md.month < start_md.month {
                base_year + 1
            } else {
                base_year
            };
            end_md.on_year(year)
        });

        DateResolution::from_bounds(start, end)
    }
}

impl DateNormalizer for HuashanDates {
    fn normalize(&self, raw: &str) -> DateResolution {
        let Some(s) = DateTokenUtils::clean(raw) else {
            return DateResolution::unresolved();
        };
        if DateTokenUtils::is_standing(s) {
            return DateResolution::permanent();
        }
        let (left, right) = DateTokenUtils::split_range(s, SEPARATORS);
        self.resolve(left, right)
    }

    fn source_id(&self) -> &str {
        HUASHAN_API
    }
}
