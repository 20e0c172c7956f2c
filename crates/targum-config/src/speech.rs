use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_command() -> String {
    "espeak -v {lang} -s {wpm}".to_string()
}

fn default_lang() -> String {
    "en-US".to_string()
}

fn default_rate() -> f32 {
    0.8
}

fn default_unit() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Text-to-speech program line, the text is appended as the last
    /// argument. `{lang}` and `{wpm}` are filled in from the settings below.
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Slightly slower than normal for clarity
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
    #[serde(default = "default_unit")]
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            lang: default_lang(),
            rate: default_rate(),
            pitch: default_unit(),
            volume: default_unit(),
        }
    }
}

impl SpeechConfig {
    pub fn new() -> Self {
        let command = env::var("TARGUM_SPEECH_COMMAND").unwrap_or_else(|_| default_command());

        Self {
            command,
            ..Self::default()
        }
    }
}
