use serde::{Deserialize, Serialize};

/// Uniform response envelope shared by every resource endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            data,
            message: Some(message.into()),
        }
    }
}

/// A trending challenge/topic from the microblogging platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub challenge: String,
    pub reason: String,
}

/// An image macro from the meme directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meme {
    pub title: String,
    pub url: String,
}

/// A hot submission from the link-aggregation forum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    pub title: String,
    pub subreddit: String,
    pub score: i64,
    pub url: String,
}

/// A headline from the news search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub source: String,
    pub url: String,
}

/// A catalog thread from the imageboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardThread {
    pub subject: String,
    pub replies: i64,
    pub url: String,
}
