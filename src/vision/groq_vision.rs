use async_trait::async_trait;
use base64::prelude::*;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

use crate::config::{resolve_api_key, VisionConfig};
use crate::error::ServiceError;

use super::interface::AnalyzerInterface;

pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Analyzer backed by a Groq-hosted multimodal chat-completion model.
pub struct GroqAnalyzer {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
}

impl GroqAnalyzer {
    pub fn new(config: &VisionConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: resolve_api_key(&config.api_key_env),
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl AnalyzerInterface for GroqAnalyzer {
    async fn analyze(&self, prompt: &str, image_path: &Path) -> Result<String, anyhow::Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingCredential(self.api_key_env.clone()))?;

        let data = tokio::fs::read(image_path).await?;
        let image_url = encode_image(image_path, &data);
        let payload = build_chat_payload(&self.model, prompt, &image_url);

        debug!(
            model = %self.model,
            image_bytes = data.len(),
            "Sending image for analysis"
        );

        let resp = self
            .client
            .post(GROQ_CHAT_URL)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::ImageAnalysis(format!("{status}: {body}")).into());
        }

        let body: Value = resp.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ServiceError::ImageAnalysis("malformed response body".to_string()))?;

        Ok(content.trim().to_string())
    }
}

/// Base64 data URL for an image file's bytes.
pub fn encode_image(path: &Path, data: &[u8]) -> String {
    format!("data:{};base64,{}", image_mime(path), BASE64_STANDARD.encode(data))
}

/// Chat-completion request with a text part and an image part in one user
/// message, OpenAI vision format.
pub fn build_chat_payload(model: &str, prompt: &str, image_url: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": image_url}}
                ]
            }
        ]
    })
}

fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_image_data_url() {
        let url = encode_image(Path::new("scan.png"), b"fakepng");
        assert!(url.starts_with("data:image/png;base64,"), "got: {url}");
        assert!(url.contains(&BASE64_STANDARD.encode(b"fakepng")));
    }

    #[test]
    fn test_chat_payload_parts() {
        let payload = build_chat_payload(
            "meta-llama/llama-4-scout-17b-16e-instruct",
            "What is in this image?",
            "data:image/jpeg;base64,aWtlcG5n",
        );

        assert_eq!(payload["model"], "meta-llama/llama-4-scout-17b-16e-instruct");

        let message = &payload["messages"][0];
        assert_eq!(message["role"], "user");

        let parts = message["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "What is in this image?");
        assert_eq!(parts[1]["type"], "image_url");

        let url = parts[1]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a.PNG")), "image/png");
        assert_eq!(image_mime(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("noext")), "image/jpeg");
    }
}
