use crate::api::{FetchError, Source};
use crate::models::response::Meme;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const MEMES_URL: &str = "https://api.imgflip.com/get_memes";
const TOP_MEMES: usize = 5;

/// Popular templates from the image-macro directory.
pub struct ImgflipMemes {
    client: Client,
}

impl ImgflipMemes {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn map_memes(json: &Value) -> Result<Vec<Meme>, FetchError> {
        if json.get("success").and_then(|s| s.as_bool()) != Some(true) {
            return Err(FetchError::Payload(
                "memes API did not return success".to_string(),
            ));
        }
        let memes = json
            .get("data")
            .and_then(|d| d.get("memes"))
            .and_then(|m| m.as_array())
            .ok_or_else(|| FetchError::Payload("expected data.memes array".to_string()))?;

        let mut mapped = Vec::new();
        for meme in memes.iter().take(TOP_MEMES) {
            if let (Some(name), Some(url)) = (
                meme.get("name").and_then(|n| n.as_str()),
                meme.get("url").and_then(|u| u.as_str()),
            ) {
                mapped.push(Meme {
                    title: name.to_string(),
                    url: url.to_string(),
                });
            }
        }
        Ok(mapped)
    }
}

#[async_trait]
impl Source for ImgflipMemes {
    fn name(&self) -> &str {
        "imgflip-memes"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        debug!("Fetching trending memes from {}", MEMES_URL);
        let response = self.client.get(MEMES_URL).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let memes = Self::map_memes(&json)?;
        debug!("Mapped {} memes", memes.len());
        serde_json::to_value(memes).map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_top_five_memes() {
        let json = json!({
            "success": true,
            "data": {"memes": [
                {"name": "Drake", "url": "https://i.imgflip.com/1.jpg"},
                {"name": "Two Buttons", "url": "https://i.imgflip.com/2.jpg"},
                {"name": "Change My Mind", "url": "https://i.imgflip.com/3.jpg"},
                {"name": "Distracted", "url": "https://i.imgflip.com/4.jpg"},
                {"name": "Expanding Brain", "url": "https://i.imgflip.com/5.jpg"},
                {"name": "Sixth", "url": "https://i.imgflip.com/6.jpg"}
            ]}
        });

        let memes = ImgflipMemes::map_memes(&json).unwrap();
        assert_eq!(memes.len(), 5);
        assert_eq!(memes[0].title, "Drake");
        assert_eq!(memes[4].url, "https://i.imgflip.com/5.jpg");
    }

    #[test]
    fn rejects_unsuccessful_response() {
        let json = json!({"success": false, "error_message": "nope"});
        assert!(matches!(
            ImgflipMemes::map_memes(&json),
            Err(FetchError::Payload(_))
        ));
    }
}
