use crate::api::{FetchError, Source};
use crate::models::response::TrendingTopic;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const TRENDS_URL: &str = "https://api.twitter.com/1.1/trends/place.json";
const WORLDWIDE_WOEID: &str = "1";
const TOP_TRENDS: usize = 3;

/// Worldwide trending topics from the microblogging platform.
pub struct TwitterTrends {
    client: Client,
    bearer_token: String,
}

impl TwitterTrends {
    pub fn new(client: Client, bearer_token: String) -> Self {
        Self {
            client,
            bearer_token,
        }
    }

    fn map_trends(json: &Value) -> Result<Vec<TrendingTopic>, FetchError> {
        let trends = json
            .get(0)
            .and_then(|place| place.get("trends"))
            .and_then(|t| t.as_array())
            .ok_or_else(|| FetchError::Payload("expected trends array".to_string()))?;

        let mut topics = Vec::new();
        for trend in trends.iter().take(TOP_TRENDS) {
            let name = trend
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("No Name");
            let volume = trend
                .get("tweet_volume")
                .and_then(|v| v.as_i64())
                .map(|v| v.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            topics.push(TrendingTopic {
                challenge: name.to_string(),
                reason: format!("Tweet Volume: {}", volume),
            });
        }
        Ok(topics)
    }
}

#[async_trait]
impl Source for TwitterTrends {
    fn name(&self) -> &str {
        "twitter-trends"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let url = format!("{}?id={}", TRENDS_URL, WORLDWIDE_WOEID);
        debug!("Fetching Twitter trends from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let topics = Self::map_trends(&json)?;
        debug!("Mapped {} trending topics", topics.len());
        serde_json::to_value(topics).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_top_three_trends_with_volume() {
        let json = json!([{
            "trends": [
                {"name": "#one", "tweet_volume": 1200},
                {"name": "#two", "tweet_volume": null},
                {"name": "#three", "tweet_volume": 50},
                {"name": "#four", "tweet_volume": 9}
            ]
        }]);

        let topics = TwitterTrends::map_trends(&json).unwrap();
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].challenge, "#one");
        assert_eq!(topics[0].reason, "Tweet Volume: 1200");
        assert_eq!(topics[1].reason, "Tweet Volume: N/A");
    }

    #[test]
    fn rejects_payload_without_trends() {
        let json = json!([{"locations": []}]);
        assert!(matches!(
            TwitterTrends::map_trends(&json),
            Err(FetchError::Payload(_))
        ));
    }
}
