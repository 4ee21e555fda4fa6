use crate::api::{FetchError, Source};
use crate::models::response::RedditPost;
use crate::utils::keywords;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE: &str = "https://oauth.reddit.com";
const USER_AGENT: &str = "trend_aggregator/0.1";
const HOT_LIMIT: usize = 25;

/// Hot submissions from the link-aggregation forum, filtered to the web3
/// keyword set. Uses the client-credentials OAuth flow; a fresh token is
/// exchanged on every fetch since fetches are already rate-limited by the
/// freshness cache.
pub struct RedditTrends {
    client: Client,
    client_id: String,
    client_secret: String,
    subreddit: String,
}

impl RedditTrends {
    pub fn new(client: Client, client_id: String, client_secret: String, subreddit: String) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            subreddit,
        }
    }

    async fn exchange_token(&self) -> Result<String, FetchError> {
        debug!("Exchanging Reddit client credentials for a token");
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("User-Agent", USER_AGENT)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        json.get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| FetchError::Auth("token response missing access_token".to_string()))
    }

    fn map_posts(json: &Value, subreddit: &str) -> Result<Vec<RedditPost>, FetchError> {
        let children = json
            .get("data")
            .and_then(|d| d.get("children"))
            .and_then(|c| c.as_array())
            .ok_or_else(|| FetchError::Payload("expected data.children array".to_string()))?;

        let mut posts = Vec::new();
        for child in children {
            let data = match child.get("data") {
                Some(d) => d,
                None => continue,
            };
            let title = match data.get("title").and_then(|t| t.as_str()) {
                Some(t) => t,
                None => continue,
            };
            if !keywords::matches_web3(title) {
                continue;
            }
            posts.push(RedditPost {
                title: title.to_string(),
                subreddit: subreddit.to_string(),
                score: data.get("score").and_then(|s| s.as_i64()).unwrap_or(0),
                url: data
                    .get("permalink")
                    .and_then(|p| p.as_str())
                    .map(|p| format!("https://www.reddit.com{}", p))
                    .unwrap_or_default(),
            });
        }
        Ok(posts)
    }
}

#[async_trait]
impl Source for RedditTrends {
    fn name(&self) -> &str {
        "reddit-web3-trends"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let token = self.exchange_token().await?;
        let url = format!(
            "{}/r/{}/hot?limit={}",
            OAUTH_BASE, self.subreddit, HOT_LIMIT
        );
        debug!("Fetching hot posts from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let posts = Self::map_posts(&json, &self.subreddit)?;
        debug!("Mapped {} keyword-matching posts", posts.len());
        serde_json::to_value(posts).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_keyword_matching_posts() {
        let json = json!({
            "data": {"children": [
                {"data": {"title": "Ethereum gas fees drop", "score": 420, "permalink": "/r/c/1"}},
                {"data": {"title": "My cat pictures", "score": 9000, "permalink": "/r/c/2"}},
                {"data": {"title": "New DeFi protocol audited", "score": 77, "permalink": "/r/c/3"}}
            ]}
        });

        let posts = RedditTrends::map_posts(&json, "CryptoCurrency").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Ethereum gas fees drop");
        assert_eq!(posts[0].url, "https://www.reddit.com/r/c/1");
        assert_eq!(posts[1].score, 77);
    }

    #[test]
    fn rejects_payload_without_listing() {
        let json = json!({"error": 401});
        assert!(matches!(
            RedditTrends::map_posts(&json, "CryptoCurrency"),
            Err(FetchError::Payload(_))
        ));
    }
}
