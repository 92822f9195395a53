//! Website scraping for tenant bootstrap.
//!
//! [`SiteScraper::scrape`] fetches a company's public site and runs
//! independent best-effort extractors over the raw HTML: logo candidates,
//! brand colors, visible text, and page metadata. It then opportunistically
//! pulls "services" and "about" sub-pages and appends their text. Only the
//! primary page fetch can fail the scrape; every enrichment failure is
//! swallowed and logged.
//!
//! The extracted text is meant to be fed to the intelligence-extraction
//! analysis mode to produce structured company facts; that wiring lives in
//! the web layer, not here.

mod error;
mod extract;
mod scraper;

pub use error::ScrapeError;
pub use extract::{extract_colors, extract_logo, extract_metadata, extract_text, SiteColors, SiteMetadata};
pub use scraper::{normalize_url, ScrapedSite, SiteScraper};
