//! Date-string interpretation for the seven exhibition sites.
//!
//! Every site writes its exhibition dates differently. Each normalizer in
//! [`normalizers`] turns one site's raw text into a [`DateResolution`]; none
//! of them ever fails; text that cannot be read resolves to
//! [`DateResolution::unresolved`].

use chrono::NaiveDate;
use serde::Serialize;

pub mod normalizers;

pub use normalizers::{
    FubonDates, HuashanDates, MocaDates, NpmDates, NtnuDates, SongshanDates, TfamDates,
};

/// Structured result of reading an exhibition date string.
///
/// Fields are private so the invariants always hold:
/// an end date never appears without a start date, and a permanent
/// exhibition never carries an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct DateResolution {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_permanent: bool,
}

impl DateResolution {
    /// Nothing could be read from the text
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// The text explicitly marks a standing exhibition
    pub fn permanent() -> Self {
        Self {
            start_date: None,
            end_date: None,
            is_permanent: true,
        }
    }

    /// Apply the start/end decision table.
    ///
    /// | start | end | result                  |
    /// |-------|-----|-------------------------|
    /// | no    | any | unresolved              |
    /// | yes   | no  | (start, none, permanent)|
    /// | yes   | yes | (start, end, bounded)   |
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self {
                start_date: Some(start),
                end_date: Some(end),
                is_permanent: false,
            },
            (Some(start), None) => Self {
                start_date: Some(start),
                end_date: None,
                is_permanent: true,
            },
            (None, _) => Self::unresolved(),
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_permanent(&self) -> bool {
        self.is_permanent
    }

    pub fn is_resolved(&self) -> bool {
        self.start_date.is_some() || self.is_permanent
    }

    /// Start date as `YYYY-MM-DD`
    pub fn start_date_string(&self) -> Option<String> {
        self.start_date.map(format_date)
    }

    /// End date as `YYYY-MM-DD`
    pub fn end_date_string(&self) -> Option<String> {
        self.end_date.map(format_date)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Contract shared by every per-site date interpreter
pub trait DateNormalizer: Send + Sync {
    /// Resolve raw scraped date text. Never fails.
    fn normalize(&self, raw: &str) -> DateResolution;

    /// Site key this normalizer reads dates for
    fn source_id(&self) -> &str;
}
