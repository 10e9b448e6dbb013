use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{resolve_api_key, TTSConfig};
use crate::error::ServiceError;

use super::interface::SynthesizerInterface;
use super::playback;

/// Synthesizer backed by the ElevenLabs text-to-speech API.
pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    voice: String,
    model: String,
    playback: bool,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: &TTSConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: resolve_api_key(&config.api_key_env),
            api_key_env: config.api_key_env.clone(),
            voice: config.voice.clone(),
            model: config.model.clone(),
            playback: config.playback,
        }
    }
}

/// ElevenLabs TTS request URL for a given voice, mp3 output.
pub fn build_tts_url(voice: &str) -> String {
    format!("https://api.elevenlabs.io/v1/text-to-speech/{voice}?output_format=mp3_22050_32")
}

#[async_trait]
impl SynthesizerInterface for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, anyhow::Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingCredential(self.api_key_env.clone()))?;

        let url = build_tts_url(&self.voice);
        debug!(voice = %self.voice, model = %self.model, text_len = text.len(), "Synthesizing with ElevenLabs");

        let resp = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .json(&json!({
                "text": text,
                "model_id": self.model,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75
                }
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Synthesis(format!("{status}: {body}")).into());
        }

        let bytes = resp.bytes().await?;
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, &bytes).await?;
        debug!(path = %output_path.display(), bytes = bytes.len(), "Wrote synthesized audio");

        if self.playback {
            if let Err(e) = playback::play(output_path).await {
                warn!("Audio playback failed: {e}");
            }
        }

        Ok(output_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_construction() {
        let url = build_tts_url("Aria");
        assert!(url.starts_with("https://api.elevenlabs.io"));
        assert!(url.contains("/text-to-speech/Aria"));
        assert!(url.contains("output_format=mp3_22050_32"));
    }
}
