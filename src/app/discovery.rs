//! Dataset URL discovery and URL-list persistence
//!
//! Discovery produces the URL list the coordinator consumes. The core only
//! depends on the [`Discovery`] trait; the production implementation
//! scrapes the TLC trip record landing page, extracting secure-transport
//! links from the FAQ accordion markup. The discovered list is persisted
//! to a newline-separated side file for audit and replay, and can be read
//! back to skip scraping entirely.

use std::collections::BTreeSet;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::constants::selectors;
use crate::errors::{DiscoveryError, DiscoveryResult};

use super::client::TlcClient;
use super::models::SourceUrl;

/// Source of the URL list consumed by the coordinator
///
/// The concurrent-download core has no dependency on how links are found;
/// anything that yields a finite list of source URLs can drive it.
pub trait Discovery {
    /// Produce the finite list of dataset file URLs
    fn list_urls(&self) -> impl Future<Output = DiscoveryResult<Vec<SourceUrl>>> + Send;
}

/// Discovery by scraping the TLC landing page
#[derive(Debug, Clone)]
pub struct PageDiscovery {
    client: Arc<TlcClient>,
    page_url: Url,
}

impl PageDiscovery {
    /// Create a discovery over the given page URL
    pub fn new(client: Arc<TlcClient>, page_url: &str) -> DiscoveryResult<Self> {
        let page_url = Url::parse(page_url).map_err(|e| DiscoveryError::InvalidUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, page_url })
    }

    /// Extract dataset file URLs from the landing page HTML
    ///
    /// Only `https` links inside the FAQ accordion count. Results are
    /// deduplicated and sorted so repeated scrapes of the same page are
    /// deterministic.
    pub fn extract_urls(html: &str) -> DiscoveryResult<Vec<SourceUrl>> {
        let selector = Selector::parse(selectors::DATASET_LINK_SELECTOR).map_err(|_| {
            DiscoveryError::InvalidSelector {
                selector: selectors::DATASET_LINK_SELECTOR.to_string(),
            }
        })?;

        let document = Html::parse_document(html);
        let mut urls = BTreeSet::new();

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !href.starts_with("https://") {
                continue;
            }
            match SourceUrl::parse(href) {
                Ok(url) => {
                    urls.insert(url);
                }
                Err(e) => debug!("Skipping unparseable link '{}': {}", href, e),
            }
        }

        Ok(urls.into_iter().collect())
    }
}

impl Discovery for PageDiscovery {
    async fn list_urls(&self) -> DiscoveryResult<Vec<SourceUrl>> {
        info!("Discovering dataset URLs from {}", self.page_url);
        let html = self.client.get_page(&self.page_url).await?;
        let urls = Self::extract_urls(&html)?;

        if urls.is_empty() {
            return Err(DiscoveryError::NoUrlsFound {
                page: self.page_url.to_string(),
            });
        }

        info!("Discovered {} dataset URLs", urls.len());
        Ok(urls)
    }
}

/// Persist a URL list as newline-separated plain text
pub async fn write_url_list(path: &Path, urls: &[SourceUrl]) -> DiscoveryResult<()> {
    let content = urls
        .iter()
        .map(SourceUrl::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    tokio::fs::write(path, content).await?;
    info!("Wrote {} URLs to {}", urls.len(), path.display());
    Ok(())
}

/// Read a previously persisted URL list
///
/// Blank lines are skipped; any other line that fails `SourceUrl`
/// validation makes the whole read fail, since a silently dropped URL
/// would break the replay guarantee.
pub async fn read_url_list(path: &Path) -> DiscoveryResult<Vec<SourceUrl>> {
    let content = tokio::fs::read_to_string(path).await?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(SourceUrl::parse)
        .collect()
}
