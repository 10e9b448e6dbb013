use thiserror::Error;

/// Failure kinds produced by the external service clients. Each one ends up
/// as a human-readable string in the response fields rather than a structured
/// fault to the browser.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("transcription service error: {0}")]
    Transcription(String),

    #[error("image analysis error: {0}")]
    ImageAnalysis(String),

    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("audio playback error: {0}")]
    Playback(String),
}
