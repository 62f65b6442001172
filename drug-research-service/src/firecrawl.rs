//! Firecrawl-backed search and scraping.
//!
//! The pipeline treats search and scraping as an opaque capability that
//! catches its own errors: a failed search is an empty result list and a
//! failed scrape is `None`. Nothing here propagates an error to a stage.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1";

/// One search result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Markdown content of a scraped page.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    pub markdown: String,
}

/// Search and scraping capability the pipeline depends on.
#[async_trait]
pub trait DrugSearch: Send + Sync {
    /// Search for general drug information on a topic.
    async fn search_drug_info(&self, query: &str, limit: u32) -> Vec<SearchHit>;

    /// Search scoped to one drug's interaction and safety profile.
    async fn search_drug_interactions(&self, drug_name: &str, limit: u32) -> Vec<SearchHit>;

    /// Scrape one page as markdown. `None` when the page cannot be fetched.
    async fn scrape_page(&self, url: &str) -> Option<ScrapedPage>;
}

/// Client for the Firecrawl v1 search and scrape API.
pub struct FirecrawlClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    async fn search(&self, query: &str, limit: u32) -> Vec<SearchHit> {
        match self.try_search(query, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search error: {e}");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str, limit: u32) -> anyhow::Result<Vec<SearchHit>> {
        let body = serde_json::json!({
            "query": query,
            "limit": limit,
            "scrapeOptions": { "formats": ["markdown"] }
        });

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.data)
    }

    async fn try_scrape(&self, url: &str) -> anyhow::Result<Option<String>> {
        let body = serde_json::json!({
            "url": url,
            "formats": ["markdown"]
        });

        let response = self
            .http
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ScrapeResponse = response.json().await?;
        Ok(parsed.data.and_then(|d| d.markdown))
    }
}

#[async_trait]
impl DrugSearch for FirecrawlClient {
    async fn search_drug_info(&self, query: &str, limit: u32) -> Vec<SearchHit> {
        self.search(&format!("{query} drug information interactions dosage"), limit)
            .await
    }

    async fn search_drug_interactions(&self, drug_name: &str, limit: u32) -> Vec<SearchHit> {
        self.search(
            &format!("{drug_name} drug interactions contraindications safety"),
            limit,
        )
        .await
    }

    async fn scrape_page(&self, url: &str) -> Option<ScrapedPage> {
        match self.try_scrape(url).await {
            Ok(Some(markdown)) => Some(ScrapedPage { markdown }),
            Ok(None) => {
                warn!("Scrape of {url} returned no markdown");
                None
            }
            Err(e) => {
                warn!("Scraping error for {url}: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    data: Option<ScrapeData>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes() {
        let payload = r#"{
            "success": true,
            "data": [
                {"url": "https://example.org/metformin", "title": "Metformin", "description": "Drug info"},
                {"url": "https://example.org/interactions"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].url, "https://example.org/metformin");
        assert_eq!(parsed.data[0].title.as_deref(), Some("Metformin"));
        assert!(parsed.data[1].title.is_none());
    }

    #[test]
    fn test_search_response_without_data_is_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_scrape_response_deserializes() {
        let payload = r##"{"success": true, "data": {"markdown": "# Metformin\nBiguanide."}}"##;
        let parsed: ScrapeResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(
            parsed.data.and_then(|d| d.markdown).as_deref(),
            Some("# Metformin\nBiguanide.")
        );
    }
}
