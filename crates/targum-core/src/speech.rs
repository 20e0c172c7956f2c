use targum_config::speech::SpeechConfig;
use targum_types::UtteranceId;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech synthesis is not supported")]
    Unsupported,

    #[error("Speech playback failed: {0}")]
    Playback(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(id: UtteranceId, text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            id,
            text: text.into(),
            lang: config.lang.clone(),
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        }
    }
}

/// Text-to-speech backend
///
/// Playback is fire-and-forget: `speak` only starts it, and the host reports
/// the end (or a late failure) back to the popup controller by utterance id.
pub trait SpeechEngine {
    fn is_supported(&self) -> bool;

    /// Stop whatever is playing. No-op when idle.
    fn cancel(&mut self);

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
}
