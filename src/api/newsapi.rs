use crate::api::{FetchError, Source};
use crate::models::response::NewsArticle;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const QUERY: &str = "web3";
const TOP_ARTICLES: usize = 10;

/// Recent headlines about the thematic query from the news search API.
pub struct NewsHeadlines {
    client: Client,
    api_key: String,
}

impl NewsHeadlines {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    fn map_articles(json: &Value) -> Result<Vec<NewsArticle>, FetchError> {
        if json.get("status").and_then(|s| s.as_str()) != Some("ok") {
            return Err(FetchError::Payload(
                "news API did not return ok status".to_string(),
            ));
        }
        let articles = json
            .get("articles")
            .and_then(|a| a.as_array())
            .ok_or_else(|| FetchError::Payload("expected articles array".to_string()))?;

        let mut mapped = Vec::new();
        for article in articles.iter().take(TOP_ARTICLES) {
            if let (Some(title), Some(url)) = (
                article.get("title").and_then(|t| t.as_str()),
                article.get("url").and_then(|u| u.as_str()),
            ) {
                let source = article
                    .get("source")
                    .and_then(|s| s.get("name"))
                    .and_then(|n| n.as_str())
                    .unwrap_or("Unknown");
                mapped.push(NewsArticle {
                    title: title.to_string(),
                    source: source.to_string(),
                    url: url.to_string(),
                });
            }
        }
        Ok(mapped)
    }
}

#[async_trait]
impl Source for NewsHeadlines {
    fn name(&self) -> &str {
        "news-web3"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let url = format!("{}?q={}&sortBy=publishedAt", EVERYTHING_URL, QUERY);
        debug!("Fetching news headlines from {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let articles = Self::map_articles(&json)?;
        debug!("Mapped {} articles", articles.len());
        serde_json::to_value(articles).map_err(|e| FetchError::Payload(e.to_string()))
    }
}
