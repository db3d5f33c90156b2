use super::base::{attr, selector, text_joined, text_of, to_record, HttpFetcher};
use crate::constants::NTNU_LIST_URL;
use crate::error::Result;
use crate::normalize::NtnuDates;
use crate::types::{ExhibitionRecord, ExhibitionSource, Museum, RawListing};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{info, instrument, warn};

static TIME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:展覽時間|時間)[:：]\s*([^\n。]+)").expect("valid regex"));
static PLACE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:展覽地點|地點)[:：]\s*([^\n。]+)").expect("valid regex"));

/// NTNU Art Museum (WordPress). Titles and images come from the index
/// figures; date and place are labelled lines in the post body.
pub struct NtnuCrawler {
    fetcher: HttpFetcher,
    dates: NtnuDates,
}

impl NtnuCrawler {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            dates: NtnuDates,
        }
    }

    pub fn parse_index(html: &str) -> Result<Vec<RawListing>> {
        let document = Html::parse_document(html);
        let figures = selector("figure.wp-caption")?;
        let link = selector("a[href]")?;
        let image = selector("img[src]")?;
        let caption = selector("figcaption")?;

        let listings = document
            .select(&figures)
            .map(|figure| RawListing {
                title: figure
                    .select(&caption)
                    .next()
                    .map(text_of)
                    .unwrap_or_default(),
                url: figure.select(&link).next().map(|a| attr(a, "href")).unwrap_or_default(),
                image_url: figure.select(&image).next().map(|i| attr(i, "src")).unwrap_or_default(),
                ..Default::default()
            })
            .collect();
        Ok(listings)
    }

    /// `(time text, place text)` from the labelled lines of a post body
    pub fn parse_detail(html: &str) -> Result<(String, String)> {
        let document = Html::parse_document(html);
        let Some(entry) = document.select(&selector("div.entry.clr")?).next() else {
            return Ok((String::new(), String::new()));
        };
        let text = text_joined(entry, "\n");

        let grab = |re: &Regex| {
            re.captures(&text)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_default()
        };
        Ok((grab(&TIME_LINE), grab(&PLACE_LINE)))
    }
}

#[async_trait::async_trait]
impl ExhibitionSource for NtnuCrawler {
    fn museum(&self) -> Museum {
        Museum::Ntnu
    }

    #[instrument(skip(self))]
    async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
        let index = self.fetcher.get_text(NTNU_LIST_URL).await?;
        let listings = Self::parse_index(&index)?;
        info!("Found {} exhibitions on the NTNU index", listings.len());

        let mut records = Vec::with_capacity(listings.len());
        for mut listing in listings {
            if !listing.url.is_empty() {
                self.fetcher.pause().await;
                match self.fetcher.get_text(&listing.url).await {
                    Ok(body) => {
                        let (time, place) = Self::parse_detail(&body)?;
                        listing.date_text = time.clone();
                        listing.time = time;
                        listing.location = place;
                    }
                    Err(e) => warn!("No detail page for {}: {}", listing.url, e),
                }
            }
            records.push(to_record(self.museum(), &self.dates, listing));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <figure class="wp-caption">
          <a href="https://www.artmuse.ntnu.edu.tw/index.php/2024/07/01/show/">
            <img src="https://www.artmuse.ntnu.edu.tw/wp-content/uploads/a.jpg"></a>
          <figcaption>師大典藏展</figcaption>
        </figure>
        <figure class="wp-caption"><figcaption>No link</figcaption></figure>"#;

    const DETAIL: &str = r#"
        <div class="entry clr">
          <p>展覽時間：2024/7/1（二）起</p>
          <p>展覽地點：<strong>師大美術館 B1</strong></p>
          <p>策展人：某某。</p>
        </div>"#;

    #[test]
    fn test_parse_index() {
        let listings = NtnuCrawler::parse_index(INDEX).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "師大典藏展");
        assert!(listings[0].url.ends_with("/show/"));
        assert!(listings[0].image_url.ends_with("a.jpg"));
        assert_eq!(listings[1].url, "");
    }

    #[test]
    fn test_parse_detail_labelled_lines() {
        let (time, place) = NtnuCrawler::parse_detail(DETAIL).unwrap();
        assert_eq!(time, "2024/7/1（二）起");
        assert_eq!(place, "師大美術館 B1");

        let listing = RawListing {
            date_text: time,
            ..Default::default()
        };
        let record = to_record(Museum::Ntnu, &NtnuDates, listing);
        assert_eq!(record.dates.start_date_string().as_deref(), Some("2024-07-01"));
        assert!(record.dates.is_permanent());
    }

    #[test]
    fn test_missing_entry_yields_empty() {
        assert_eq!(
            NtnuCrawler::parse_detail("<p>時間：2025/1/1</p>").unwrap(),
            (String::new(), String::new())
        );
    }
}
