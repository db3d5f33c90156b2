use super::base::HttpFetcher;
use crate::config::DirectoryConfig;
use crate::constants::{
    DIRECTORY_KEYWORDS, DIRECTORY_MUSEUM_TYPES, DIRECTORY_PARK_IDS, DIRECTORY_PARK_QUERIES,
    PLACES_API_KEY_ENV, PLACES_FIELD_MASK, PLACES_SEARCH_URL,
};
use crate::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    language_code: &'a str,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchTextResponse {
    pub places: Option<Vec<Place>>,
    pub next_page_token: Option<String>,
    pub error: Option<PlacesApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlacesApiError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// The subset of a Places API place the directory keeps
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub types: Option<Vec<String>>,
    pub website_uri: Option<String>,
    pub international_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub regular_opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocalizedText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningHours {
    pub weekday_descriptions: Option<Vec<String>>,
}

impl Place {
    /// Typed as a museum or an art gallery
    pub fn is_museum_like(&self) -> bool {
        self.types
            .iter()
            .flatten()
            .any(|t| DIRECTORY_MUSEUM_TYPES.contains(&t.as_str()))
    }

    /// One of the two creative parks kept regardless of type
    pub fn is_kept_park(&self) -> bool {
        self.id
            .as_deref()
            .is_some_and(|id| DIRECTORY_PARK_IDS.contains(&id))
    }
}

/// Places collected across searches, deduplicated by id.
/// A later copy of a place replaces the earlier one but keeps its position.
#[derive(Debug, Default)]
pub struct PlaceCatalog {
    places: Vec<Place>,
    index: HashMap<String, usize>,
}

impl PlaceCatalog {
    pub fn insert(&mut self, place: Place) {
        let Some(id) = place.id.clone().filter(|id| !id.is_empty()) else {
            return;
        };
        match self.index.get(&id) {
            Some(&i) => self.places[i] = place,
            None => {
                self.index.insert(id, self.places.len());
                self.places.push(place);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Museums and galleries, plus the two parks
    pub fn select(self) -> Vec<Place> {
        self.places
            .into_iter()
            .filter(|p| p.is_museum_like() || p.is_kept_park())
            .collect()
    }
}

/// One row of the museum directory report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryEntry {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: String,
    pub phone: String,
    pub rating: Option<f64>,
    /// Weekday opening hours joined with `|`
    pub opening_hours: String,
}

impl From<Place> for DirectoryEntry {
    fn from(place: Place) -> Self {
        let location = place.location.unwrap_or_default();
        Self {
            place_id: place.id.unwrap_or_default(),
            name: place.display_name.and_then(|n| n.text).unwrap_or_default(),
            address: place.formatted_address.unwrap_or_default(),
            latitude: location.latitude,
            longitude: location.longitude,
            website: place.website_uri.unwrap_or_default(),
            phone: place.international_phone_number.unwrap_or_default(),
            rating: place.rating,
            opening_hours: place
                .regular_opening_hours
                .and_then(|h| h.weekday_descriptions)
                .unwrap_or_default()
                .join("|"),
        }
    }
}

/// Google Places text-search client for the Taipei museum directory
pub struct PlacesClient {
    fetcher: HttpFetcher,
    api_key: String,
    config: DirectoryConfig,
}

impl PlacesClient {
    pub fn new(fetcher: HttpFetcher, api_key: String, config: DirectoryConfig) -> Self {
        Self {
            fetcher,
            api_key,
            config,
        }
    }

    /// Read the API key from `$GOOGLE_PLACES_API_KEY`
    pub fn from_env(fetcher: HttpFetcher, config: DirectoryConfig) -> Result<Self> {
        let api_key = std::env::var(PLACES_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ScraperError::Config(format!("{} is not set", PLACES_API_KEY_ENV)))?;
        Ok(Self::new(fetcher, api_key, config))
    }

    /// Every page of results for one query. An error reply ends the query
    /// with whatever was collected so far.
    #[instrument(skip(self))]
    pub async fn search_all_pages(&self, query: &str) -> Result<Vec<Place>> {
        let headers = [
            ("X-Goog-Api-Key", self.api_key.as_str()),
            ("X-Goog-FieldMask", PLACES_FIELD_MASK),
        ];
        let mut places = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let request = SearchTextRequest {
                text_query: query,
                language_code: &self.config.language_code,
                page_size: self.config.page_size,
                page_token: page_token.as_deref(),
            };
            let response: SearchTextResponse = self
                .fetcher
                .post_json(PLACES_SEARCH_URL, &headers, &request)
                .await?;

            if let Some(error) = response.error {
                let message = error.message.unwrap_or_default();
                warn!(code = ?error.code, "Places search for '{}' failed: {}", query, message);
                println!("❌ Places API error for '{}': {}", query, message);
                break;
            }

            let page = response.places.unwrap_or_default();
            info!("'{}' returned {} places", query, page.len());
            places.extend(page);

            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    page_token = Some(token);
                    self.fetcher.pause().await;
                }
                None => break,
            }
        }
        Ok(places)
    }

    /// Run every directory query and keep the museums, galleries and parks
    pub async fn collect_directory(&self) -> Result<Vec<DirectoryEntry>> {
        let mut catalog = PlaceCatalog::default();
        for query in DIRECTORY_KEYWORDS.iter().chain(DIRECTORY_PARK_QUERIES) {
            println!("🔍 Searching '{}' ...", query);
            for place in self.search_all_pages(query).await? {
                catalog.insert(place);
            }
        }
        println!("🔢 Unique places found: {}", catalog.len());

        let entries: Vec<DirectoryEntry> = catalog.select().into_iter().map(DirectoryEntry::from).collect();
        info!("Kept {} museums and parks for the directory", entries.len());
        println!("✅ Places kept: {}", entries.len());
        Ok(entries)
    }
}
