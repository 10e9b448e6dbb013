use async_trait::async_trait;
use std::path::Path;

/// Vision-language analyzer interface - a hosted multimodal model that takes
/// a text prompt plus an image and returns a text response.
///
/// Unlike the transcriber this may fail (credential, I/O, transport, service);
/// the orchestrator catches.
#[async_trait]
pub trait AnalyzerInterface: Send + Sync {
    async fn analyze(&self, prompt: &str, image_path: &Path) -> Result<String, anyhow::Error>;
}
