use super::base::{attr, first_text, join_url, selector, text_of, to_record, HttpFetcher};
use crate::constants::{MOCA_BASE_URL, MOCA_LIST_URL};
use crate::error::Result;
use crate::normalize::MocaDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use scraper::Html;
use tracing::{info, instrument, warn};

pub struct MocaCrawler {
    fetcher: HttpFetcher,
    dates: MocaDates,
}

impl MocaCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: MocaDates,
        }
    }

    pub fn parse_listings(html: &str) -> Result<Vec<RawListing>> {
        let document = Html::parse_document(html);
        let cards = selector("div.list.show")?;
        let link = selector("a.link[href]")?;
        let title = selector("h3.imgTitle")?;
        let day = selector("p.day")?;
        let image = selector("img.img[data-src]")?;
        let place = selector("h4.imgSubTitle")?;

        let listings = document
            .select(&cards)
            .map(|card| {
                let days: Vec<String> = card.select(&day).take(2).map(text_of).collect();
                RawListing {
                    title: first_text(card, &title),
                    date_text: days.join(" - "),
                    url: card
                        .select(&link)
                        .next()
                        .map(|a| join_url(MOCA_BASE_URL, &attr(a, "href")))
                        .unwrap_or_default(),
                    image_url: card
                        .select(&image)
                        .next()
                        .map(|img| join_url(MOCA_BASE_URL, &attr(img, "data-src")))
                        .unwrap_or_default(),
                    location: first_text(card, &place),
                    ..Default::default()
                }
            })
            .collect();
        Ok(listings)
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for MocaCrawler {
    fn museum(&self) -> Museum {
        Museum::Moca
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let body = self.fetcher.get_text(MOCA_LIST_URL).await?;
        let listings = Self::parse_listings(&body)?;
        info!("Parsed {} exhibitions from MOCA Taipei", listings.len());
        if listings.is_empty() {
            warn!("No exhibitions found - the page structure may have changed");
        }
        Ok(listings
            .into_iter()
            .map(|listing| to_record(self.museum(), &self.dates, listing))
            .collect())
    }
}
