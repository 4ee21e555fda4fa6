use crate::api::fourchan::BoardThreads;
use crate::api::imgflip::ImgflipMemes;
use crate::api::newsapi::NewsHeadlines;
use crate::api::reddit::RedditTrends;
use crate::api::twitter::TwitterTrends;
use crate::api::{FetchError, Source};
use crate::config::AggregatorConfig;
use crate::models::cache::FreshnessCache;
use crate::models::response::{
    ApiResponse, BoardThread, Meme, NewsArticle, RedditPost, TrendingTopic,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Upstream,
}

impl Origin {
    pub fn message(self) -> &'static str {
        match self {
            Origin::Cache => "served from cache",
            Origin::Upstream => "fetched from upstream",
        }
    }
}

/// A payload handed back by the refresh protocol, tagged with its origin.
#[derive(Debug, Clone)]
pub struct Served {
    pub value: Value,
    pub origin: Origin,
}

/// Orchestrates the refresh protocol over one shared freshness cache and the
/// five upstream sources.
pub struct TrendService {
    cache: Arc<FreshnessCache>,
    twitter: TwitterTrends,
    imgflip: ImgflipMemes,
    reddit: RedditTrends,
    news: NewsHeadlines,
    board: BoardThreads,
}

impl TrendService {
    pub fn new(config: AggregatorConfig) -> Self {
        let client = Client::new();
        Self {
            cache: Arc::new(FreshnessCache::new(config.cache_ttl)),
            twitter: TwitterTrends::new(client.clone(), config.twitter_bearer),
            imgflip: ImgflipMemes::new(client.clone()),
            reddit: RedditTrends::new(
                client.clone(),
                config.reddit_client_id,
                config.reddit_client_secret,
                config.subreddit,
            ),
            news: NewsHeadlines::new(client.clone(), config.news_api_key),
            board: BoardThreads::new(client),
        }
    }

    pub fn cache(&self) -> &Arc<FreshnessCache> {
        &self.cache
    }

    /// The refresh protocol: serve the cached payload if it is still fresh,
    /// otherwise invoke the source and store its result. A failed fetch
    /// propagates unchanged and leaves the cache entry untouched.
    pub async fn refresh(&self, source: &dyn Source) -> Result<Served, FetchError> {
        self.refresh_at(source, self.cache.default_ttl(), Instant::now())
            .await
    }

    /// Same as `refresh` but with an explicit TTL and observation instant.
    pub async fn refresh_at(
        &self,
        source: &dyn Source,
        ttl: Duration,
        now: Instant,
    ) -> Result<Served, FetchError> {
        let resource = source.name();

        if self.cache.is_fresh(resource, now, ttl) {
            // is_fresh implies the entry exists; a concurrent put can only
            // have replaced it with a newer pair.
            if let Some(entry) = self.cache.get(resource) {
                debug!("Serving {} from cache", resource);
                return Ok(Served {
                    value: entry.value,
                    origin: Origin::Cache,
                });
            }
        }

        info!("Refreshing {} from upstream", resource);
        match source.fetch().await {
            Ok(value) => {
                self.cache.put(resource, value.clone(), now);
                Ok(Served {
                    value,
                    origin: Origin::Upstream,
                })
            }
            Err(err) => {
                error!("Failed to refresh {}: {}", resource, err);
                Err(err)
            }
        }
    }

    async fn serve<T: DeserializeOwned>(
        &self,
        source: &dyn Source,
    ) -> Result<ApiResponse<T>, FetchError> {
        let served = self.refresh(source).await?;
        let data =
            serde_json::from_value(served.value).map_err(|e| FetchError::Payload(e.to_string()))?;
        Ok(ApiResponse::success(data, served.origin.message()))
    }

    pub async fn trending(&self) -> Result<ApiResponse<Vec<TrendingTopic>>, FetchError> {
        self.serve(&self.twitter).await
    }

    pub async fn memes(&self) -> Result<ApiResponse<Vec<Meme>>, FetchError> {
        self.serve(&self.imgflip).await
    }

    pub async fn reddit(&self) -> Result<ApiResponse<Vec<RedditPost>>, FetchError> {
        self.serve(&self.reddit).await
    }

    pub async fn news(&self) -> Result<ApiResponse<Vec<NewsArticle>>, FetchError> {
        self.serve(&self.news).await
    }

    pub async fn board(&self) -> Result<ApiResponse<Vec<BoardThread>>, FetchError> {
        self.serve(&self.board).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        name: &'static str,
        payload: Option<Value>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn succeeding(name: &'static str, payload: Value) -> Self {
            Self {
                name,
                payload: Some(payload),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                payload: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Source for StubSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.payload {
                Some(value) => Ok(value.clone()),
                None => Err(FetchError::Payload("upstream unavailable".to_string())),
            }
        }
    }

    fn service() -> TrendService {
        TrendService::new(AggregatorConfig::default())
    }

    #[tokio::test]
    async fn serves_from_cache_inside_ttl_and_refetches_after() {
        let service = service();
        let ttl = Duration::from_secs(300);
        let payload = json!([{"challenge": "X", "reason": "Y"}]);
        let stub = StubSource::succeeding("trends", payload.clone());
        let t0 = Instant::now();

        let first = service.refresh_at(&stub, ttl, t0).await.unwrap();
        assert_eq!(first.origin, Origin::Upstream);
        assert_eq!(first.value, payload);
        assert_eq!(stub.calls(), 1);

        let second = service
            .refresh_at(&stub, ttl, t0 + Duration::from_secs(100))
            .await
            .unwrap();
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(second.value, payload);
        assert_eq!(stub.calls(), 1, "fresh entry must not invoke the source");

        let third = service
            .refresh_at(&stub, ttl, t0 + Duration::from_secs(301))
            .await
            .unwrap();
        assert_eq!(third.origin, Origin::Upstream);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_prior_entry_untouched() {
        let service = service();
        let ttl = Duration::from_secs(300);
        let t0 = Instant::now();

        let good = StubSource::succeeding("trends", json!(["good"]));
        service.refresh_at(&good, ttl, t0).await.unwrap();
        let before = service.cache().get("trends").unwrap();

        let bad = StubSource::failing("trends");
        let stale_at = t0 + Duration::from_secs(400);
        let err = service.refresh_at(&bad, ttl, stale_at).await.unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));

        let after = service.cache().get("trends").unwrap();
        assert_eq!(after.value, before.value);
        assert_eq!(after.fetched_at, before.fetched_at);
        assert!(service.cache().is_fresh("trends", t0, ttl));
    }

    #[tokio::test]
    async fn first_fetch_failure_leaves_resource_absent() {
        let service = service();
        let ttl = Duration::from_secs(300);
        let t0 = Instant::now();

        let trends = StubSource::succeeding("trends", json!([{"challenge": "X", "reason": "Y"}]));
        service.refresh_at(&trends, ttl, t0).await.unwrap();

        let memes = StubSource::failing("memes");
        assert!(service.refresh_at(&memes, ttl, t0).await.is_err());
        assert!(service.cache().get("memes").is_none());
        assert!(!service.cache().is_fresh("memes", t0, ttl));
    }

    #[tokio::test]
    async fn next_request_after_failure_retries_the_source() {
        let service = service();
        let ttl = Duration::from_secs(300);
        let t0 = Instant::now();

        let bad = StubSource::failing("memes");
        assert!(service.refresh_at(&bad, ttl, t0).await.is_err());
        assert!(service.refresh_at(&bad, ttl, t0).await.is_err());
        assert_eq!(bad.calls(), 2, "no negative caching");
    }

    #[tokio::test]
    async fn per_call_ttl_overrides_default() {
        let service = service();
        let payload = json!(["v"]);
        let stub = StubSource::succeeding("news", payload);
        let t0 = Instant::now();

        service
            .refresh_at(&stub, Duration::from_secs(10), t0)
            .await
            .unwrap();
        let later = t0 + Duration::from_secs(30);

        let long = service
            .refresh_at(&stub, Duration::from_secs(60), later)
            .await
            .unwrap();
        assert_eq!(long.origin, Origin::Cache);

        let short = service
            .refresh_at(&stub, Duration::from_secs(10), later)
            .await
            .unwrap();
        assert_eq!(short.origin, Origin::Upstream);
    }
}
