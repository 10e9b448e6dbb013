use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub asr: ASRConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub tts: TTSConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ASRConfig {
    #[serde(default = "default_stt_model")]
    pub model: String,
    #[serde(default = "default_groq_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_vision_model")]
    pub model: String,
    #[serde(default = "default_groq_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTSConfig {
    /// Which synthesis engine to use: "gtts" or "elevenlabs".
    #[serde(default = "default_tts_engine")]
    pub engine: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_tts_model")]
    pub model: String,
    /// Play the synthesized file through the host OS player after writing it.
    #[serde(default = "default_playback")]
    pub playback: bool,
    #[serde(default = "default_elevenlabs_key_env")]
    pub api_key_env: String,
}

fn default_port() -> u16 {
    8080
}

fn default_audio_dir() -> String {
    "cache/audio".to_string()
}

fn default_upload_dir() -> String {
    "cache/uploads".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_stt_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_vision_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_groq_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_tts_engine() -> String {
    "gtts".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_voice() -> String {
    "Aria".to_string()
}

fn default_tts_model() -> String {
    "eleven_turbo_v2".to_string()
}

fn default_playback() -> bool {
    true
}

fn default_elevenlabs_key_env() -> String {
    "ELEVENLABS_API_KEY".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            audio_dir: default_audio_dir(),
            upload_dir: default_upload_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for ASRConfig {
    fn default() -> Self {
        Self {
            model: default_stt_model(),
            api_key_env: default_groq_key_env(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            model: default_vision_model(),
            api_key_env: default_groq_key_env(),
        }
    }
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            engine: default_tts_engine(),
            language: default_language(),
            voice: default_voice(),
            model: default_tts_model(),
            playback: default_playback(),
            api_key_env: default_elevenlabs_key_env(),
        }
    }
}

/// Resolve an API credential from the environment variable named in config.
pub fn resolve_api_key(api_key_env: &str) -> Option<String> {
    std::env::var(api_key_env).ok().filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.system.port, 8080);
        assert_eq!(config.asr.model, "whisper-large-v3");
        assert_eq!(config.tts.engine, "gtts");
        assert!(config.tts.playback);
    }

    #[test]
    fn test_partial_override() {
        let yaml = "tts:\n  engine: elevenlabs\n  playback: false\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tts.engine, "elevenlabs");
        assert!(!config.tts.playback);
        // Untouched sections keep their defaults
        assert_eq!(config.tts.voice, "Aria");
        assert_eq!(config.vision.api_key_env, "GROQ_API_KEY");
    }
}
