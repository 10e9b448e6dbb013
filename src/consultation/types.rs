use std::path::PathBuf;

/// Fixed placeholder when no voice clip was submitted.
pub const NO_VOICE_INPUT: &str = "No voice input provided.";

/// Fixed advisory when no image was submitted; no analyzer call is made.
pub const NO_IMAGE_PROVIDED: &str =
    "No image provided for analysis. Please upload a photo for a medical assessment.";

/// Fixed instruction prepended to the transcription before the analyzer call.
pub const DOCTOR_INSTRUCTION: &str = "You have to act as a professional doctor, i know you are \
not but this is for learning purpose. What's in this image?. Do you find anything wrong with it \
medically? If you make a differential, suggest some remedies for them. Donot add any numbers or \
special characters in your response. Your response should be in one long paragraph. Also always \
answer as if you are answering to a real person. Donot say 'In the image I see' but say 'With \
what I see, I think you have ....' Dont respond as an AI model in markdown, your answer should \
mimic that of an actual doctor not an AI bot. Keep your answer concise (max 2 sentences). No \
preamble, start your answer right away please. ";

/// One consultation request. Both inputs are independently optional; either
/// or both absent is a valid, expected request.
#[derive(Debug, Default, Clone)]
pub struct ConsultRequest {
    pub audio_reference: Option<PathBuf>,
    pub image_reference: Option<PathBuf>,
}

/// Outcome handed back to the presentation surface. Constructed fresh per
/// request; nothing outlives it except the synthesized file on disk.
#[derive(Debug, Clone)]
pub struct ConsultOutcome {
    pub transcription: String,
    pub advisory_text: String,
    pub synthesized_audio_reference: Option<PathBuf>,
}
