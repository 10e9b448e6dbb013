use async_trait::async_trait;
use std::path::Path;

/// Transcriber interface - converts a recorded voice clip to text.
///
/// No-throw contract: credential and service failures come back as
/// human-readable "Error: ..." strings, never as a raised error. The caller
/// displays whatever string it gets.
#[async_trait]
pub trait TranscriberInterface: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> String;
}
