use super::base::{attr, child_elements, join_url, selector, text_of, to_record, HttpFetcher};
use crate::constants::{TFAM_BASE_URL, TFAM_LIST_URL};
use crate::error::Result;
use crate::normalize::TfamDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use scraper::{ElementRef, Html};
use tracing::{info, instrument, warn};

// Position-based: the list container carries no usable class names
const CONTAINER: &str =
    "body > form > div:nth-of-type(3) > div:nth-of-type(3) > div > div:nth-of-type(2)";

/// Taipei Fine Arts Museum exhibition list
pub struct TfamCrawler {
    fetcher: HttpFetcher,
    dates: TfamDates,
}

impl TfamCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: TfamDates,
        }
    }

    pub fn parse_listings(html: &str) -> Result<Vec<RawListing>> {
        let document = Html::parse_document(html);
        let Some(container) = document.select(&selector(CONTAINER)?).next() else {
            return Ok(Vec::new());
        };

        let listings = child_elements(container, "div")
            .into_iter()
            .map(Self::parse_item)
            .filter(|listing| {
                !(listing.title.is_empty()
                    && listing.date_text.is_empty()
                    && listing.location.is_empty()
                    && listing.image_url.is_empty()
                    && listing.url.is_empty())
            })
            .collect();
        Ok(listings)
    }

    fn parse_item(item: ElementRef<'_>) -> RawListing {
        let divs = child_elements(item, "div");
        let image_url = divs
            .first()
            .and_then(|d| child_elements(*d, "img").into_iter().next())
            .map(|img| join_url(TFAM_BASE_URL, &attr(img, "src")))
            .unwrap_or_default();

        let Some(body) = divs.get(1).copied() else {
            return RawListing {
                image_url,
                ..Default::default()
            };
        };

        let title = child_elements(body, "h3")
            .into_iter()
            .next()
            .and_then(|h3| child_elements(h3, "a").into_iter().next())
            .map(text_of)
            .unwrap_or_default();

        let paragraphs = child_elements(body, "p");
        let when = paragraphs.first().map(|p| text_of(*p)).unwrap_or_default();
        let location = paragraphs.get(1).map(|p| text_of(*p)).unwrap_or_default();

        let url = child_elements(body, "div")
            .into_iter()
            .next()
            .map(|d| attr(d, "id"))
            .filter(|id| !id.is_empty())
            .map(|id| {
                // Only the last three characters of the element id are the exhibition id
                let tail = id.char_indices().rev().nth(2).map_or(id.as_str(), |(i, _)| &id[i..]);
                format!("{}Exhibition/Exhibition_Special.aspx?ddlLang=zh-tw&id={}", TFAM_BASE_URL, tail)
            })
            .unwrap_or_default();

        // The date paragraph doubles as the opening-hours text
        RawListing {
            title,
            date_text: when.clone(),
            time: when,
            location,
            url,
            image_url,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for TfamCrawler {
    fn museum(&self) -> Museum {
        Museum::Tfam
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let body = self.fetcher.get_text(TFAM_LIST_URL).await?;
        let listings = Self::parse_listings(&body)?;
        info!("Parsed {} exhibitions from Taipei Fine Arts Museum", listings.len());
        if listings.is_empty() {
            warn!("No exhibitions found - the list may only be rendered by script");
        }
        Ok(listings
            .into_iter()
            .map(|listing| to_record(self.museum(), &self.dates, listing))
            .collect())
    }
}
