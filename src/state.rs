use std::path::PathBuf;
use std::sync::Arc;

use crate::asr::GroqTranscriber;
use crate::config::Config;
use crate::consultation::ConsultationOrchestrator;
use crate::tts::TTSFactory;
use crate::vision::GroqAnalyzer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<ConsultationOrchestrator>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let transcriber = Arc::new(GroqTranscriber::new(&config.asr));
        let analyzer = Arc::new(GroqAnalyzer::new(&config.vision));
        let synthesizer = TTSFactory::create_tts(&config.tts)?;

        let orchestrator = Arc::new(ConsultationOrchestrator::new(
            transcriber,
            analyzer,
            synthesizer,
            PathBuf::from(&config.system.audio_dir),
        ));

        Ok(Self {
            config,
            orchestrator,
        })
    }
}
