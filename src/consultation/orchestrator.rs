use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::asr::TranscriberInterface;
use crate::tts::SynthesizerInterface;
use crate::utils::audio_files;
use crate::vision::AnalyzerInterface;

use super::types::{
    ConsultOutcome, ConsultRequest, DOCTOR_INSTRUCTION, NO_IMAGE_PROVIDED, NO_VOICE_INPUT,
};

/// Sequences the three external calls and converts their failures into
/// user-visible text. Every failure kind ends up as a string in one of the
/// outcome fields; nothing is raised to the presentation surface. One
/// invocation runs fully to completion, with no retry and no state kept
/// between requests beyond output-directory housekeeping.
pub struct ConsultationOrchestrator {
    transcriber: Arc<dyn TranscriberInterface>,
    analyzer: Arc<dyn AnalyzerInterface>,
    synthesizer: Arc<dyn SynthesizerInterface>,
    audio_dir: PathBuf,
}

impl ConsultationOrchestrator {
    pub fn new(
        transcriber: Arc<dyn TranscriberInterface>,
        analyzer: Arc<dyn AnalyzerInterface>,
        synthesizer: Arc<dyn SynthesizerInterface>,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            transcriber,
            analyzer,
            synthesizer,
            audio_dir,
        }
    }

    pub async fn handle(&self, request: ConsultRequest) -> ConsultOutcome {
        let mut transcription = NO_VOICE_INPUT.to_string();
        let mut advisory_text = String::new();
        let mut synthesized: Option<PathBuf> = None;

        let outcome: anyhow::Result<()> = async {
            // 1. Transcription. The transcriber never raises; service errors
            // come back as an "Error: ..." string and are displayed as-is.
            if let Some(audio) = request.audio_reference.as_deref() {
                transcription = self.transcriber.transcribe(audio).await;
            }

            // 2. Image analysis. Failures are caught here and become the
            // advisory text; image errors never abort the request.
            if let Some(image) = request.image_reference.as_deref() {
                let prompt = format!("{DOCTOR_INSTRUCTION}{transcription}");
                advisory_text = match self.analyzer.analyze(&prompt, image).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Image analysis failed: {e}");
                        format!("Error processing image: {e}")
                    }
                };
            } else {
                advisory_text = NO_IMAGE_PROVIDED.to_string();
            }

            // 3. Synthesis over whatever text we have, error text included.
            // Stale output files are cleared first, best-effort.
            if !advisory_text.is_empty() {
                audio_files::clear_output_files(&self.audio_dir);
                let output_path = audio_files::output_filename(&self.audio_dir);
                synthesized =
                    Some(self.synthesizer.synthesize(&advisory_text, &output_path).await?);
            }

            Ok(())
        }
        .await;

        // 4. Outer guard: anything not caught above becomes a generic system
        // failure message. Transcription and the synthesized path keep the
        // values they held when the failure happened.
        if let Err(e) = outcome {
            error!("Consultation failed: {e}");
            advisory_text = format!("A system error occurred: {e}");
        }

        info!(
            has_audio = request.audio_reference.is_some(),
            has_image = request.image_reference.is_some(),
            synthesized = synthesized.is_some(),
            "Consultation complete"
        );

        ConsultOutcome {
            transcription,
            advisory_text,
            synthesized_audio_reference: synthesized,
        }
    }
}
