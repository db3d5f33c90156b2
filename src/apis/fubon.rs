use super::base::{attr, first_text, join_url, selector, text_of, to_record, HttpFetcher};
use crate::constants::{FUBON_BASE_URL, FUBON_LIST_URL};
use crate::error::Result;
use crate::normalize::FubonDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use scraper::Html;
use tracing::{info, instrument, warn};

pub struct FubonCrawler {
    fetcher: HttpFetcher,
    dates: FubonDates,
}

impl FubonCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: FubonDates,
        }
    }

    /// Each card holds three `info_group` blocks: title, blurb, then
    /// date and place paragraphs.
    pub fn parse_listings(html: &str) -> Result<Vec<RawListing>> {
        let document = Html::parse_document(html);
        let cards = selector("a.fb-exhibitions-card")?;
        let info_group = selector("div.info_group")?;
        let title = selector("h2.font-h2.font-bold")?;
        let paragraph = selector("p")?;
        let image = selector("img[src]")?;

        let mut listings = Vec::new();
        for card in document.select(&cards) {
            let groups: Vec<_> = card.select(&info_group).collect();
            let (date_text, location) = match groups.get(2) {
                Some(group) => {
                    let mut paragraphs = group.select(&paragraph).map(text_of);
                    (
                        paragraphs.next().unwrap_or_default(),
                        paragraphs.next().unwrap_or_default(),
                    )
                }
                None => (String::new(), String::new()),
            };

            listings.push(RawListing {
                title: groups
                    .first()
                    .map(|g| first_text(*g, &title))
                    .unwrap_or_default(),
                date_text,
                location,
                url: join_url(FUBON_BASE_URL, &attr(card, "href")),
                image_url: card
                    .select(&image)
                    .next()
                    .map(|img| join_url(FUBON_BASE_URL, &attr(img, "src")))
                    .unwrap_or_default(),
                ..Default::default()
            });
        }
        Ok(listings)
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for FubonCrawler {
    fn museum(&self) -> Museum {
        Museum::Fubon
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let body = self.fetcher.get_text(FUBON_LIST_URL).await?;
        let listings = Self::parse_listings(&body)?;
        info!("Parsed {} exhibitions from Fubon Art Museum", listings.len());
        if listings.is_empty() {
            warn!("No exhibitions found - the page structure may have changed");
        }
        Ok(listings
            .into_iter()
            .map(|listing| to_record(self.museum(), &self.dates, listing))
            .collect())
    }
}
