pub mod groq_vision;
pub mod interface;

pub use groq_vision::GroqAnalyzer;
pub use interface::AnalyzerInterface;
