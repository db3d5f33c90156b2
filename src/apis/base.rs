use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};
use crate::normalize::DateNormalizer;
use crate::types::{ExhibitionRecord, Museum, RawListing};
use reqwest::{Client, Url};
use scraper::{ElementRef, Selector};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Shared HTTP client for all site adapters
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// GET a page as text; non-2xx statuses are errors
    #[instrument(skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("HTTP GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Api {
                message: format!("GET {} failed with status {}", url, status),
            });
        }
        let body = response.text().await?;
        debug!("HTTP response: status={}, size={} bytes", status, body.len());
        Ok(body)
    }

    /// POST a JSON body and decode the JSON reply. The body is decoded whatever
    /// the status, since JSON APIs put their error details in it.
    #[instrument(skip(self, headers, body))]
    pub async fn post_json<B, T>(&self, url: &str, headers: &[(&str, &str)], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("HTTP POST {}", url);
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("HTTP response: status={}, size={} bytes", status, text.len());
        serde_json::from_str(&text).map_err(|e| ScraperError::Api {
            message: format!("POST {} returned {} with an unreadable body: {}", url, status, e),
        })
    }

    /// Wait the configured delay before hitting the same site again
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Compile a CSS selector, surfacing parse failures as errors
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {:?}", css, e)))
}

/// Every text node trimmed and concatenated
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Non-empty text nodes trimmed and joined with `sep`
pub fn text_joined(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Text of the first match under `scope`, or empty
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).next().map(text_of).unwrap_or_default()
}

/// Attribute of an element, or empty
pub fn attr(element: ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().trim().to_string()
}

/// Direct element children named `tag`
pub fn child_elements<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

/// Resolve `href` against `base`; falls back to the raw value when either is not a URL
pub fn join_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve the listing's date text and build the output record
pub fn to_record(museum: Museum, dates: &dyn DateNormalizer, listing: RawListing) -> ExhibitionRecord {
    let resolution = dates.normalize(&listing.date_text);
    if !resolution.is_resolved() && !listing.date_text.trim().is_empty() {
        debug!(museum = %museum, raw = %listing.date_text, "date text left unresolved");
    }
    ExhibitionRecord::from_listing(museum, listing, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::FubonDates;
    use scraper::Html;

    #[test]
    fn test_text_helpers() {
        let doc = Html::parse_fragment("<div><p> 2025.1.1 </p>\n<p>  展覽  </p></div>");
        let div = doc.select(&selector("div").unwrap()).next().unwrap();
        assert_eq!(text_of(div), "2025.1.1展覽");
        assert_eq!(text_joined(div, " "), "2025.1.1 展覽");
        assert_eq!(first_text(div, &selector("p").unwrap()), "2025.1.1");
        assert_eq!(first_text(div, &selector("h1").unwrap()), "");
        assert_eq!(child_elements(div, "p").len(), 2);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://www.npm.gov.tw", "/Exhibition-Content.aspx?sno=1"),
            "https://www.npm.gov.tw/Exhibition-Content.aspx?sno=1"
        );
        assert_eq!(
            join_url("https://example.org/a/", "img/一 張.jpg"),
            "https://example.org/a/img/%E4%B8%80%20%E5%BC%B5.jpg"
        );
        assert_eq!(join_url("https://example.org", "https://cdn.example.org/x.png"), "https://cdn.example.org/x.png");
        assert_eq!(join_url("https://example.org", "  "), "");
    }

    #[test]
    fn test_bad_selector_is_error() {
        assert!(matches!(selector("div[[["), Err(ScraperError::Selector(_))));
    }

    #[test]
    fn test_to_record_resolves_dates() {
        let listing = RawListing {
            title: "展".to_string(),
            date_text: "2025.10.23 - 2026.4.20".to_string(),
            ..Default::default()
        };
        let record = to_record(Museum::Fubon, &FubonDates, listing);
        assert_eq!(record.dates.start_date_string().as_deref(), Some("2025-10-23"));
        assert_eq!(record.date_text, "2025.10.23 - 2026.4.20");
    }

    #[test]
    fn test_fetcher_builds_from_defaults() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }
}
