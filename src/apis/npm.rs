use super::base::{child_elements, first_text, join_url, selector, text_of, to_record, HttpFetcher};
use crate::constants::{NPM_BASE_URL, NPM_LIST_URL};
use crate::error::Result;
use crate::normalize::NpmDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use scraper::{ElementRef, Html};
use tracing::{info, instrument, warn};

/// National Palace Museum current-exhibition list. The page has been seen
/// in two card layouts; both are read.
pub struct NpmCrawler {
    fetcher: HttpFetcher,
    dates: NpmDates,
}

impl NpmCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: NpmDates,
        }
    }

    pub fn parse_listings(html: &str) -> Result<Vec<RawListing>> {
        let document = Html::parse_document(html);
        let items = selector("li.mb-8")?;
        let title_new = selector("h3.font-medium")?;
        let title_old = selector("h3.card-title.h5")?;
        let date_list = selector("div.exhibition-list-date")?;
        let content_top = selector("div.card-content-top")?;
        let tags_new = selector("div.mt-2")?;
        let tags_old = selector("div.card-tags")?;
        let place = selector("div.card-content-bottom")?;
        let link = selector("a[href]")?;
        let image = selector("img")?;

        let mut listings = Vec::new();
        for item in document.select(&items) {
            let title = item
                .select(&title_new)
                .next()
                .or_else(|| item.select(&title_old).next())
                .map(text_of)
                .unwrap_or_default();

            let date_text = match item.select(&date_list).next() {
                Some(node) => text_of(node),
                None => item
                    .select(&content_top)
                    .next()
                    .and_then(Self::unclassed_child_div)
                    .map(text_of)
                    .unwrap_or_default(),
            };

            let tags = item
                .select(&tags_new)
                .next()
                .or_else(|| item.select(&tags_old).next())
                .map(text_of)
                .unwrap_or_default();

            let url = item
                .select(&link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| join_url(NPM_BASE_URL, href))
                .unwrap_or_default();

            let image_url = item
                .select(&image)
                .next()
                .and_then(Self::image_src)
                .unwrap_or_default();

            listings.push(RawListing {
                title,
                date_text,
                topic: tags.clone(),
                category: tags,
                url,
                image_url,
                location: first_text(item, &place),
                ..Default::default()
            });
        }
        Ok(listings)
    }

    fn unclassed_child_div(top: ElementRef<'_>) -> Option<ElementRef<'_>> {
        child_elements(top, "div")
            .into_iter()
            .find(|div| div.value().attr("class").is_none())
    }

    /// Lazy-loaded images keep the real source in `data-src`; the
    /// placeholder spinner is ignored and resize parameters dropped.
    fn image_src(img: ElementRef<'_>) -> Option<String> {
        let src = img
            .value()
            .attr("data-src")
            .or_else(|| img.value().attr("src"))?;
        if src.is_empty() || src.contains("loader.gif") {
            return None;
        }
        let joined = join_url(NPM_BASE_URL, src);
        Some(joined.split('&').next().unwrap_or_default().to_string())
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for NpmCrawler {
    fn museum(&self) -> Museum {
        Museum::Npm
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let body = self.fetcher.get_text(NPM_LIST_URL).await?;
        let listings = Self::parse_listings(&body)?;
        info!("Parsed {} exhibitions from the National Palace Museum", listings.len());
        if listings.is_empty() {
            warn!("No exhibitions found - the page structure may have changed");
        }
        Ok(listings
            .into_iter()
            .map(|listing| to_record(self.museum(), &self.dates, listing))
            .collect())
    }
}
