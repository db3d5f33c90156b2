use chrono::NaiveDate;
use regex::Regex;

use crate::normalize::DateResolution;

/// Text that marks a standing exhibition on any of the sites
pub const STANDING_MARKERS: &[&str] = &["常設", "長期展"];

/// Separators shared by several sites, tried in order
pub const RANGE_SEPARATORS: &[&str] = &[" - ", "~", "～"];

/// Shared building blocks for site-specific date normalizers
pub struct DateTokenUtils;

impl DateTokenUtils {
    /// Trim the raw text; `None` when nothing is left.
    /// `str::trim` already covers NBSP and the ideographic space.
    pub fn clean(raw: &str) -> Option<&str> {
        let s = raw.trim();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    /// Whether the text announces a permanent/standing exhibition
    pub fn is_standing(s: &str) -> bool {
        STANDING_MARKERS.iter().any(|m| s.contains(m))
            || s.to_lowercase().contains("permanent")
    }

    /// Split on the first separator (in list order) that occurs in `s`.
    /// Without any separator the whole text is the start token.
    pub fn split_range<'a>(s: &'a str, separators: &[&str]) -> (&'a str, Option<&'a str>) {
        for sep in separators {
            if let Some((left, right)) = s.split_once(sep) {
                return (left.trim(), Some(right.trim()));
            }
        }
        (s, None)
    }

    /// Build a date from numeric components, rejecting out-of-range values
    pub fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
        let year: i32 = year.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        let day: u32 = day.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Build a date from the first three capture groups of `re` matched against `token`
    pub fn captured_ymd(re: &Regex, token: &str) -> Option<NaiveDate> {
        let caps = re.captures(token)?;
        Self::ymd(caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str())
    }

    /// Keep only ASCII digits and dots, dropping weekday annotations and the like
    pub fn digits_and_dots(token: &str) -> String {
        token
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    }

    /// The canonical split-then-parse procedure used by every range-style site
    pub fn resolve_range<F>(raw: &str, separators: &[&str], parse_token: F) -> DateResolution
    where
        F: Fn(&str) -> Option<NaiveDate>,
    {
        let Some(s) = Self::clean(raw) else {
            return DateResolution::unresolved();
        };
        if Self::is_standing(s) {
            return DateResolution::permanent();
        }

        let (left, right) = Self::split_range(s, separators);
        let start = parse_token(left);
        let end = right.and_then(|r| parse_token(r));
        tracing::debug!(raw = s, ?start, ?end, "resolved date range");

        DateResolution::from_bounds(start, end)
    }

    /// Whether `s[start..end]` sits directly against another digit, i.e. it is
    /// only a slice of a longer number such as `2025/11/011`
    pub fn touches_digit(s: &str, start: usize, end: usize) -> bool {
        let before = s[..start].chars().next_back();
        let after = s[end..].chars().next();
        [before, after]
            .into_iter()
            .flatten()
            .any(|c| c.is_ascii_digit())
    }

    /// Search free text for date-shaped tokens: first is the start, second the end
    pub fn resolve_extracted(raw: &str, re: &Regex) -> DateResolution {
        let Some(s) = Self::clean(raw) else {
            return DateResolution::unresolved();
        };
        if Self::is_standing(s) {
            return DateResolution::permanent();
        }

        let mut tokens = re.captures_iter(s).map(|caps| {
            let whole = caps.get(0)?;
            if Self::touches_digit(s, whole.start(), whole.end()) {
                return None;
            }
            Self::ymd(caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str())
        });
        let start = tokens.next().flatten();
        let end = tokens.next().flatten();
        tracing::debug!(raw = s, ?start, ?end, "extracted dates from text");

        DateResolution::from_bounds(start, end)
    }
}
