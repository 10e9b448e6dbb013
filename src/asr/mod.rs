pub mod groq_asr;
pub mod interface;

pub use groq_asr::GroqTranscriber;
pub use interface::TranscriberInterface;
