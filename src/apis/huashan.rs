use super::base::{attr, first_text, join_url, selector, text_joined, text_of, to_record, HttpFetcher};
use crate::constants::{HUASHAN_BASE_URL, HUASHAN_LIST_URL};
use crate::error::Result;
use crate::normalize::HuashanDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{info, instrument, warn};

// onclick="location.href='/w/huashan1914/exhibition_24112011383578'"
static ONCLICK_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(/[^']+)'").expect("valid regex"));

/// Huashan 1914 Creative Park. The carousel is read from the static HTML
/// only; slides injected by script are not seen.
pub struct HuashanCrawler {
    fetcher: HttpFetcher,
    dates: HuashanDates,
}

impl HuashanCrawler {
    pub fn new(fetcher: HttpFetcher, dates: HuashanDates) -> Self {
        Self { fetcher, dates }
    }

    /// Detail-page links pulled out of the carousel images' click handlers
    pub fn parse_index(html: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(html);
        let images = selector(".swiper-slide img[onclick]")?;

        let mut links: Vec<String> = Vec::new();
        for img in document.select(&images) {
            let onclick = attr(img, "onclick");
            let Some(caps) = ONCLICK_PATH.captures(&onclick) else {
                continue;
            };
            let url = join_url(HUASHAN_BASE_URL, &caps[1]);
            if url.starts_with("http") && !links.contains(&url) {
                links.push(url);
            }
        }
        Ok(links)
    }

    pub fn parse_detail(html: &str, url: &str) -> Result<RawListing> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let card_dates: Vec<String> = document
            .select(&selector("div.card-date")?)
            .take(2)
            .map(text_of)
            .collect();

        // Only keep the opening-hours block when it actually starts with a time
        let time = document
            .select(&selector("div.card-time")?)
            .next()
            .map(|node| text_joined(node, " "))
            .filter(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or_default();

        let image_url = document
            .select(&selector("span[rel] img[src]")?)
            .next()
            .map(|img| join_url(HUASHAN_BASE_URL, &attr(img, "src")))
            .unwrap_or_default();

        Ok(RawListing {
            title: first_text(root, &selector("div.article-title.page")?),
            date_text: card_dates.join(" - "),
            location: first_text(root, &selector("a.openMap")?),
            url: url.to_string(),
            image_url,
            time,
            ..Default::default()
        })
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for HuashanCrawler {
    fn museum(&self) -> Museum {
        Museum::Huashan
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let index = self.fetcher.get_text(HUASHAN_LIST_URL).await?;
        let links = Self::parse_index(&index)?;
        info!("Found {} exhibition links in the Huashan carousel", links.len());
        if links.is_empty() {
            warn!("No carousel links found - the listing may only be rendered by script");
        }

        let mut records = Vec::new();
        for link in links {
            self.fetcher.pause().await;
            let detail = match self.fetcher.get_text(&link).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Skipping {}: {}", link, e);
                    continue;
                }
            };
            let listing = Self::parse_detail(&detail, &link)?;
            records.push(to_record(self.museum(), &self.dates, listing));
        }
        Ok(records)
    }
}
