use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::TTSConfig;
use crate::error::ServiceError;

use super::interface::SynthesizerInterface;
use super::playback;

pub const TRANSLATE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Maximum characters per translate_tts request; the endpoint truncates or
/// rejects longer queries, so longer text is voiced chunk by chunk.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Synthesizer backed by the Google Translate TTS endpoint. No credential
/// needed; returns mp3 bytes per utterance. Long text is split into chunks
/// under the endpoint's query limit and the mp3 parts are concatenated.
pub struct GttsSynthesizer {
    client: Client,
    language: String,
    playback: bool,
}

impl GttsSynthesizer {
    pub fn new(config: &TTSConfig) -> Self {
        Self {
            client: Client::new(),
            language: config.language.clone(),
            playback: config.playback,
        }
    }

    async fn fetch_chunk(&self, chunk: &str) -> Result<Vec<u8>, anyhow::Error> {
        let resp = self
            .client
            .get(TRANSLATE_TTS_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", chunk),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Synthesis(format!("{status}: {body}")).into());
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SynthesizerInterface for GttsSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, anyhow::Error> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        debug!(
            text_len = text.len(),
            chunks = chunks.len(),
            lang = %self.language,
            "Synthesizing with gTTS"
        );

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend_from_slice(&self.fetch_chunk(chunk).await?);
        }

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, &audio).await?;
        debug!(path = %output_path.display(), bytes = audio.len(), "Wrote synthesized audio");

        if self.playback {
            if let Err(e) = playback::play(output_path).await {
                warn!("Audio playback failed: {e}");
            }
        }

        Ok(output_path.to_path_buf())
    }
}

/// Split text into pieces of at most `max_chars` characters, breaking on
/// whitespace. A single word longer than the limit is hard-split.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > max_chars {
            if current_chars > 0 {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            for ch in word.chars() {
                if current_chars == max_chars {
                    chunks.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                current.push(ch);
                current_chars += 1;
            }
            continue;
        }

        if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if current_chars > 0 {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("Rest and ice it.", MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec!["Rest and ice it.".to_string()]);
    }

    #[test]
    fn test_chunks_never_exceed_limit() {
        let text = "With what I see, I think you have a mild inflammation of the joint \
                    and some swelling around the knee area, so rest it, keep it elevated, \
                    apply ice for twenty minutes a few times a day, and take an over the \
                    counter anti inflammatory if you tolerate it well."
            .repeat(3);
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let len = chunk.chars().count();
            assert!(len > 0 && len <= MAX_CHUNK_CHARS, "chunk of {len} chars: {chunk}");
        }
    }

    #[test]
    fn test_chunks_preserve_every_word() {
        let text = "one two three four five".repeat(20);
        let chunks = chunk_text(&text, 17);
        let rejoined = chunks.join(" ");
        let normalized: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().count(), normalized.len());
    }

    #[test]
    fn test_overlong_word_is_hard_split() {
        let word = "a".repeat(250);
        let chunks = chunk_text(&word, MAX_CHUNK_CHARS);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
        assert_eq!(chunks.concat(), word);
    }
}
