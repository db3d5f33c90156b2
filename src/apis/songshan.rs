use super::base::{attr, first_text, join_url, selector, to_record, HttpFetcher};
use crate::constants::{SONGSHAN_BASE_URL, SONGSHAN_LIST_URL};
use crate::error::Result;
use crate::normalize::SongshanDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use scraper::Html;
use tracing::{info, instrument, warn};

/// Songshan Cultural Park: the index only links out, every field lives on
/// the detail page.
pub struct SongshanCrawler {
    fetcher: HttpFetcher,
    dates: SongshanDates,
}

impl SongshanCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: SongshanDates,
        }
    }

    /// Detail-page links from the exhibition index, in page order
    pub fn parse_index(html: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(html);
        let rows = selector("div.rows")?;
        let link = selector("a[href]")?;

        let mut links: Vec<String> = Vec::new();
        for row in document.select(&rows) {
            let Some(a) = row.select(&link).next() else {
                continue;
            };
            let url = join_url(SONGSHAN_BASE_URL, &attr(a, "href"));
            if !url.is_empty() && !links.contains(&url) {
                links.push(url);
            }
        }
        Ok(links)
    }

    pub fn parse_detail(html: &str, url: &str) -> Result<RawListing> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let image = document
            .select(&selector("img.big_img[src]")?)
            .next()
            .map(|img| join_url(SONGSHAN_BASE_URL, &attr(img, "src")))
            .unwrap_or_default();

        Ok(RawListing {
            title: first_text(root, &selector("p.inner_title")?),
            date_text: first_text(root, &selector("p.date.montsrt")?),
            location: first_text(root, &selector("p.place")?),
            url: url.to_string(),
            image_url: image,
            ..Default::default()
        })
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for SongshanCrawler {
    fn museum(&self) -> Museum {
        Museum::Songshan
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let index = self.fetcher.get_text(SONGSHAN_LIST_URL).await?;
        let links = Self::parse_index(&index)?;
        info!("Found {} exhibition links on the Songshan index", links.len());

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

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
          <div class="rows"><a href="/exhibition/activity/123">A</a></div>
          <div class="rows"><a href="/exhibition/activity/456">B</a></div>
          <div class="rows"><a href="/exhibition/activity/123">A again</a></div>
          <div class="rows"><span>no link</span></div>
        </body></html>"#;

    const DETAIL: &str = r#"
        <html><body>
          <p class="inner_title"> 2025 台灣設計展 </p>
          <p class="date montsrt">2025-11-01 - 2025-11-30</p>
          <p class="place">五號倉庫</p>
          <img class="big_img" src="/upload/poster.jpg">
        </body></html>"#;

    #[test]
    fn test_parse_index_dedupes_and_joins() {
        let links = SongshanCrawler::parse_index(INDEX).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.songshanculturalpark.org/exhibition/activity/123",
                "https://www.songshanculturalpark.org/exhibition/activity/456",
            ]
        );
    }

    #[test]
    fn test_parse_detail() {
        let url = "https://www.songshanculturalpark.org/exhibition/activity/123";
        let listing = SongshanCrawler::parse_detail(DETAIL, url).unwrap();
        assert_eq!(listing.title, "2025 台灣設計展");
        assert_eq!(listing.date_text, "2025-11-01 - 2025-11-30");
        assert_eq!(listing.location, "五號倉庫");
        assert_eq!(listing.image_url, "https://www.songshanculturalpark.org/upload/poster.jpg");
        assert_eq!(listing.url, url);

        let record = to_record(Museum::Songshan, &SongshanDates, listing);
        assert_eq!(record.museum, "松山文創園區");
        assert_eq!(record.dates.end_date_string().as_deref(), Some("2025-11-30"));
    }

    #[test]
    fn test_parse_detail_missing_fields_are_empty() {
        let listing = SongshanCrawler::parse_detail("<html></html>", "u").unwrap();
        assert_eq!(listing.title, "");
        assert_eq!(listing.date_text, "");
        assert_eq!(listing.image_url, "");
    }
}
