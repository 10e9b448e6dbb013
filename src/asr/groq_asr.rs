use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, error};

use crate::config::{resolve_api_key, ASRConfig};
use crate::error::ServiceError;

use super::interface::TranscriberInterface;

pub const GROQ_TRANSCRIPTION_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Transcriber backed by Groq's OpenAI-compatible Whisper endpoint.
pub struct GroqTranscriber {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
}

impl GroqTranscriber {
    pub fn new(config: &ASRConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: resolve_api_key(&config.api_key_env),
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
        }
    }

    async fn request(&self, audio_path: &Path, api_key: &str) -> anyhow::Result<String> {
        let data = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        debug!(
            model = %self.model,
            bytes = data.len(),
            "Sending audio for transcription"
        );

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(audio_mime(audio_path))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", "en")
            .text("response_format", "text")
            .part("file", part);

        let resp = self
            .client
            .post(GROQ_TRANSCRIPTION_URL)
            .header("Authorization", format!("Bearer {api_key}"))
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Transcription(format!("{status}: {body}")).into());
        }

        let text = resp.text().await?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TranscriberInterface for GroqTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> String {
        let Some(api_key) = self.api_key.clone() else {
            return format!("Error: {} not found.", self.api_key_env);
        };

        match self.request(audio_path, &api_key).await {
            Ok(text) => text,
            Err(e) => {
                error!("Transcription error: {e}");
                format!("Error: {e}")
            }
        }
    }
}

/// MIME type for an uploaded clip, by extension. Browsers typically hand us
/// webm from MediaRecorder; mp3 is the fallback.
fn audio_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "audio/mpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_returns_error_string() {
        let transcriber = GroqTranscriber {
            client: Client::new(),
            api_key: None,
            api_key_env: "GROQ_API_KEY".to_string(),
            model: "whisper-large-v3".to_string(),
        };

        let text = transcriber.transcribe(Path::new("clip.mp3")).await;
        assert_eq!(text, "Error: GROQ_API_KEY not found.");
    }

    #[tokio::test]
    async fn test_unreadable_audio_returns_error_string() {
        let transcriber = GroqTranscriber {
            client: Client::new(),
            api_key: Some("test-key".to_string()),
            api_key_env: "GROQ_API_KEY".to_string(),
            model: "whisper-large-v3".to_string(),
        };

        let text = transcriber
            .transcribe(Path::new("/nonexistent/clip.mp3"))
            .await;
        assert!(text.starts_with("Error: "), "got: {text}");
    }

    #[test]
    fn test_audio_mime_by_extension() {
        assert_eq!(audio_mime(Path::new("a.webm")), "audio/webm");
        assert_eq!(audio_mime(Path::new("a.WAV")), "audio/wav");
        assert_eq!(audio_mime(Path::new("a.mp3")), "audio/mpeg");
        assert_eq!(audio_mime(Path::new("noext")), "audio/mpeg");
    }
}
