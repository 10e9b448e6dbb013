use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::TTSConfig;

use super::elevenlabs_tts::ElevenLabsSynthesizer;
use super::gtts::GttsSynthesizer;
use super::interface::SynthesizerInterface;

/// Factory for creating the configured synthesis engine.
pub struct TTSFactory;

impl TTSFactory {
    pub fn create_tts(config: &TTSConfig) -> Result<Arc<dyn SynthesizerInterface>> {
        info!("Initializing TTS engine: {}", config.engine);

        match config.engine.as_str() {
            "gtts" => Ok(Arc::new(GttsSynthesizer::new(config))),
            "elevenlabs" => Ok(Arc::new(ElevenLabsSynthesizer::new(config))),
            other => Err(anyhow::anyhow!("Unknown TTS engine: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_engines() {
        let mut config = TTSConfig::default();
        assert!(TTSFactory::create_tts(&config).is_ok());

        config.engine = "elevenlabs".to_string();
        assert!(TTSFactory::create_tts(&config).is_ok());

        config.engine = "festival".to_string();
        assert!(TTSFactory::create_tts(&config).is_err());
    }
}
