pub mod elevenlabs_tts;
pub mod factory;
pub mod gtts;
pub mod interface;
pub mod playback;

pub use elevenlabs_tts::ElevenLabsSynthesizer;
pub use factory::TTSFactory;
pub use gtts::GttsSynthesizer;
pub use interface::SynthesizerInterface;
