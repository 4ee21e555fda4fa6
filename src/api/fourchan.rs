use crate::api::{FetchError, Source};
use crate::models::response::BoardThread;
use crate::utils::keywords;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const CATALOG_URL: &str = "https://a.4cdn.org/biz/catalog.json";
const BOARD: &str = "biz";

/// Catalog threads from the imageboard's business board, filtered to the
/// web3 keyword set.
pub struct BoardThreads {
    client: Client,
}

impl BoardThreads {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn map_threads(json: &Value) -> Result<Vec<BoardThread>, FetchError> {
        let pages = json
            .as_array()
            .ok_or_else(|| FetchError::Payload("expected catalog page array".to_string()))?;

        let mut mapped = Vec::new();
        for page in pages {
            let threads = match page.get("threads").and_then(|t| t.as_array()) {
                Some(t) => t,
                None => continue,
            };
            for thread in threads {
                let subject = thread.get("sub").and_then(|s| s.as_str()).unwrap_or("");
                let comment = thread.get("com").and_then(|c| c.as_str()).unwrap_or("");
                if !keywords::matches_web3(subject) && !keywords::matches_web3(comment) {
                    continue;
                }
                let no = thread.get("no").and_then(|n| n.as_i64()).unwrap_or(0);
                mapped.push(BoardThread {
                    subject: if subject.is_empty() {
                        "(no subject)".to_string()
                    } else {
                        subject.to_string()
                    },
                    replies: thread.get("replies").and_then(|r| r.as_i64()).unwrap_or(0),
                    url: format!("https://boards.4chan.org/{}/thread/{}", BOARD, no),
                });
            }
        }
        Ok(mapped)
    }
}

#[async_trait]
impl Source for BoardThreads {
    fn name(&self) -> &str {
        "board-web3"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        debug!("Fetching imageboard catalog from {}", CATALOG_URL);
        let response = self.client.get(CATALOG_URL).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let threads = Self::map_threads(&json)?;
        debug!("Mapped {} keyword-matching threads", threads.len());
        serde_json::to_value(threads).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_catalog_by_keywords_across_pages() {
        let json = json!([
            {"page": 1, "threads": [
                {"no": 100, "sub": "NFT floor prices", "com": "discuss", "replies": 12},
                {"no": 101, "sub": "Stock picks", "com": "boomer thread", "replies": 99}
            ]},
            {"page": 2, "threads": [
                {"no": 200, "sub": "", "com": "ethereum merge aftermath", "replies": 3}
            ]}
        ]);

        let threads = BoardThreads::map_threads(&json).unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].subject, "NFT floor prices");
        assert_eq!(threads[0].url, "https://boards.4chan.org/biz/thread/100");
        assert_eq!(threads[1].subject, "(no subject)");
    }

    #[test]
    fn rejects_non_array_catalog() {
        let json = json!({"error": "banned"});
        assert!(matches!(
            BoardThreads::map_threads(&json),
            Err(FetchError::Payload(_))
        ));
    }
}
