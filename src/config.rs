use std::env;
use std::time::Duration;

const DEFAULT_TTL_SECS: u64 = 300;
const DEFAULT_SUBREDDIT: &str = "CryptoCurrency";

/// Runtime settings for the aggregator. Credentials default to empty strings;
/// a source with missing credentials simply fails its fetch with an upstream
/// error when invoked.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub twitter_bearer: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub news_api_key: String,
    pub subreddit: String,
    pub cache_ttl: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            twitter_bearer: String::new(),
            reddit_client_id: String::new(),
            reddit_client_secret: String::new(),
            news_api_key: String::new(),
            subreddit: DEFAULT_SUBREDDIT.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl AggregatorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            twitter_bearer: env::var("TWITTER_BEARER_TOKEN").unwrap_or(defaults.twitter_bearer),
            reddit_client_id: env::var("REDDIT_CLIENT_ID").unwrap_or(defaults.reddit_client_id),
            reddit_client_secret: env::var("REDDIT_CLIENT_SECRET")
                .unwrap_or(defaults.reddit_client_secret),
            news_api_key: env::var("NEWS_API_KEY").unwrap_or(defaults.news_api_key),
            subreddit: env::var("REDDIT_SUBREDDIT").unwrap_or(defaults.subreddit),
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }
}
