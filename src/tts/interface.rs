use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Speech synthesizer interface - converts text to an audio file on disk.
///
/// Implementations also play the written file through the host OS player as
/// a side effect (when enabled); playback failures are logged and swallowed
/// and never affect the returned path.
#[async_trait]
pub trait SynthesizerInterface: Send + Sync {
    /// Write synthesized speech for `text` to `output_path` and return the
    /// path that was written.
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, anyhow::Error>;
}
