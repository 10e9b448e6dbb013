pub mod orchestrator;
pub mod types;

pub use orchestrator::ConsultationOrchestrator;
pub use types::{ConsultOutcome, ConsultRequest};
