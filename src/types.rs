use crate::constants::*;
use crate::error::{Result, ScraperError};
use crate::normalize::DateResolution;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The seven sites this crate knows how to scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Museum {
    Songshan,
    Npm,
    Moca,
    Huashan,
    Fubon,
    Tfam,
    Ntnu,
}

impl Museum {
    pub const ALL: [Museum; 7] = [
        Museum::Songshan,
        Museum::Npm,
        Museum::Moca,
        Museum::Huashan,
        Museum::Fubon,
        Museum::Tfam,
        Museum::Ntnu,
    ];

    /// Key used on the command line
    pub fn key(self) -> &'static str {
        match self {
            Museum::Songshan => SONGSHAN_API,
            Museum::Npm => NPM_API,
            Museum::Moca => MOCA_API,
            Museum::Huashan => HUASHAN_API,
            Museum::Fubon => FUBON_API,
            Museum::Tfam => TFAM_API,
            Museum::Ntnu => NTNU_API,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Museum::Songshan => SONGSHAN_MUSEUM_NAME,
            Museum::Npm => NPM_MUSEUM_NAME,
            Museum::Moca => MOCA_MUSEUM_NAME,
            Museum::Huashan => HUASHAN_MUSEUM_NAME,
            Museum::Fubon => FUBON_MUSEUM_NAME,
            Museum::Tfam => TFAM_MUSEUM_NAME,
            Museum::Ntnu => NTNU_MUSEUM_NAME,
        }
    }
}

impl fmt::Display for Museum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Museum {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Museum::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| ScraperError::UnknownMuseum(s.to_string()))
    }
}

/// Text pulled off a listing before any date interpretation.
/// Missing elements are empty strings, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub title: String,
    pub date_text: String,
    pub topic: String,
    pub url: String,
    pub image_url: String,
    pub location: String,
    pub time: String,
    pub category: String,
    pub note: String,
}

/// One exhibition row of the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitionRecord {
    pub museum: String,
    pub title: String,
    /// Raw date text exactly as scraped, kept even when resolution fails
    pub date_text: String,
    #[serde(flatten)]
    pub dates: DateResolution,
    pub topic: String,
    pub url: String,
    pub image_url: String,
    pub location: String,
    pub time: String,
    pub category: String,
    pub note: String,
}

impl ExhibitionRecord {
    pub fn from_listing(museum: Museum, listing: RawListing, dates: DateResolution) -> Self {
        Self {
            museum: museum.display_name().to_string(),
            title: listing.title,
            date_text: listing.date_text,
            dates,
            topic: listing.topic,
            url: listing.url,
            image_url: listing.image_url,
            location: listing.location,
            time: listing.time,
            category: listing.category,
            note: listing.note,
        }
    }
}

/// Core trait that every museum adapter implements
#[async_trait::async_trait]
pub trait ExhibitionSource: Send + Sync {
    /// Which site this adapter scrapes
    fn museum(&self) -> Museum;

    /// Fetch the current exhibitions and resolve their dates
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_museum_round_trips_through_key() {
        for museum in Museum::ALL {
            assert_eq!(museum.key().parse::<Museum>().unwrap(), museum);
        }
        assert_eq!(" NPM ".parse::<Museum>().unwrap(), Museum::Npm);
    }

    #[test]
    fn test_unknown_museum_is_an_error() {
        let err = "louvre".parse::<Museum>().unwrap_err();
        assert!(matches!(err, ScraperError::UnknownMuseum(ref k) if k == "louvre"));
    }

    #[test]
    fn test_record_keeps_raw_date_text() {
        let listing = RawListing {
            title: "故宮展".to_string(),
            date_text: "TBD".to_string(),
            ..Default::default()
        };
        let record = ExhibitionRecord::from_listing(Museum::Npm, listing, DateResolution::unresolved());
        assert_eq!(record.museum, NPM_MUSEUM_NAME);
        assert_eq!(record.date_text, "TBD");
        assert_eq!(record.dates.start_date(), None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["start_date"], serde_json::Value::Null);
        assert_eq!(json["is_permanent"], false);
        assert_eq!(json["date_text"], "TBD");

        let dated = ExhibitionRecord::from_listing(
            Museum::Npm,
            RawListing::default(),
            DateResolution::from_bounds(NaiveDate::from_ymd_opt(2025, 1, 2), None),
        );
        let json = serde_json::to_value(&dated).unwrap();
        assert_eq!(json["start_date"], "2025-01-02");
        assert_eq!(json["is_permanent"], true);
    }
}
