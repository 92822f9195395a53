//! Site fetching and enrichment.

use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::extract::{
    extract_colors, extract_logo, extract_metadata, extract_text, SiteColors, SiteMetadata,
};

/// Fetch ceilings: the primary page, guessed sub-page paths, and link-followed
/// pages, in that order of generosity.
const MAIN_TIMEOUT: Duration = Duration::from_secs(15);
const SUBPAGE_TIMEOUT: Duration = Duration::from_secs(10);
const LINKED_PAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Text budgets: the main page and each appended sub-page.
const MAX_TEXT_CHARS: usize = 15_000;
const MAX_SUBPAGE_CHARS: usize = 5_000;

/// Sub-page path fragments worth guessing on a marketing site.
const SUBPAGE_GUESSES: &[&str] = &["services", "about", "about-us"];

/// Everything pulled from one scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedSite {
    /// The normalized URL that was actually fetched.
    pub url: String,
    pub logo_url: Option<String>,
    pub colors: SiteColors,
    /// Visible text of the main page plus any enrichment pages.
    pub text: String,
    pub metadata: SiteMetadata,
    /// Sub-pages whose text was appended.
    pub pages_fetched: Vec<String>,
}

/// Normalize a user-supplied URL: prepend `https://` when schemeless.
pub fn normalize_url(input: &str) -> Result<Url, ScrapeError> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&with_scheme).map_err(|_| ScrapeError::InvalidUrl(input.to_string()))
}

/// Scraper for company marketing sites.
pub struct SiteScraper {
    client: reqwest::Client,
}

impl SiteScraper {
    /// Create a new scraper.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
                )
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Scrape a site: fetch the primary page, run the extractors, and
    /// opportunistically append "services"/"about" sub-page text.
    ///
    /// Only the primary fetch can fail; every sub-page failure is swallowed
    /// with a warning, since those are optional enrichments.
    pub async fn scrape(&self, raw_url: &str) -> Result<ScrapedSite, ScrapeError> {
        let base = normalize_url(raw_url)?;
        info!(url = %base, "Scraping company site");

        let html = self.fetch_page(&base, MAIN_TIMEOUT).await?;

        let logo_url = extract_logo(&html, &base);
        let colors = extract_colors(&html);
        let metadata = extract_metadata(&html);
        let mut text = extract_text(&html, MAX_TEXT_CHARS);

        let mut pages_fetched = Vec::new();
        for candidate in self.enrichment_candidates(&html, &base) {
            let timeout = if candidate.guessed {
                SUBPAGE_TIMEOUT
            } else {
                LINKED_PAGE_TIMEOUT
            };
            match self.fetch_page(&candidate.url, timeout).await {
                Ok(page_html) => {
                    let page_text = extract_text(&page_html, MAX_SUBPAGE_CHARS);
                    if !page_text.is_empty() {
                        text.push_str("\n\n");
                        text.push_str(&page_text);
                        pages_fetched.push(candidate.url.to_string());
                    }
                }
                Err(err) => {
                    warn!(url = %candidate.url, error = %err, "Skipping enrichment page");
                }
            }
        }

        Ok(ScrapedSite {
            url: base.to_string(),
            logo_url,
            colors,
            text,
            metadata,
            pages_fetched,
        })
    }

    /// Guessed sub-page paths plus matching links found in the page, deduped
    /// against the base URL and each other.
    fn enrichment_candidates(&self, html: &str, base: &Url) -> Vec<EnrichmentPage> {
        let mut candidates: Vec<EnrichmentPage> = Vec::new();
        let mut seen = vec![base.to_string()];

        let mut push = |url: Url, guessed: bool, candidates: &mut Vec<EnrichmentPage>| {
            let key = url.to_string();
            if !seen.contains(&key) {
                seen.push(key);
                candidates.push(EnrichmentPage { url, guessed });
            }
        };

        for guess in SUBPAGE_GUESSES {
            if let Ok(url) = base.join(guess) {
                push(url, true, &mut candidates);
            }
        }

        let href = Regex::new(r#"(?i)<a[^>]*\shref=["']([^"'#]+)["']"#)
            .expect("href pattern is valid");
        for caps in href.captures_iter(html) {
            let target = &caps[1];
            let lowered = target.to_lowercase();
            if !(lowered.contains("service") || lowered.contains("about")) {
                continue;
            }
            if let Ok(url) = base.join(target) {
                // Stay on the same host; external "about us" links are noise.
                if url.host_str() == base.host_str() {
                    push(url, false, &mut candidates);
                }
            }
        }

        candidates
    }

    async fn fetch_page(&self, url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        debug!(url = %url, "Fetching page");
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for SiteScraper {
    fn default() -> Self {
        Self::new()
    }
}

struct EnrichmentPage {
    url: Url,
    guessed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prepends_https() {
        let url = normalize_url("example.com/about").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        let url = normalize_url("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_url("not a url at all"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_enrichment_candidates_dedupe_and_stay_on_host() {
        let scraper = SiteScraper::new();
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"
            <a href="/services">Our services</a>
            <a href="https://example.com/about-us">About</a>
            <a href="https://facebook.com/aboutexample">Follow us</a>
            <a href="/contact">Contact</a>
        "#;

        let candidates = scraper.enrichment_candidates(html, &base);
        let urls: Vec<String> = candidates.iter().map(|c| c.url.to_string()).collect();

        // Three guessed paths, plus no duplicates from the matching links
        // (/services and /about-us are already guessed), and no off-host link.
        assert_eq!(
            urls,
            vec![
                "https://example.com/services",
                "https://example.com/about",
                "https://example.com/about-us",
            ]
        );
    }

    #[test]
    fn test_enrichment_candidates_include_novel_links() {
        let scraper = SiteScraper::new();
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"<a href="/pest-services/termites">Termite service</a>"#;

        let candidates = scraper.enrichment_candidates(html, &base);
        assert!(candidates
            .iter()
            .any(|c| c.url.as_str() == "https://example.com/pest-services/termites" && !c.guessed));
    }

    // Network-touching test.
    #[tokio::test]
    #[ignore]
    async fn test_scrape_example_com() {
        let scraper = SiteScraper::new();
        let site = scraper.scrape("example.com").await.unwrap();
        assert!(site.text.contains("Example Domain"));
    }
}
