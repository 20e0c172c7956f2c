use serde::{Deserialize, Serialize};

/// CSS selectors locating entries on a dictionary result page
///
/// Defaults match Morfix English to Hebrew pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub entry: String,
    pub headword: String,
    pub part_of_speech: String,
    pub meaning: String,
    pub sample_sentence: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            entry: ".Translation_content_enTohe".to_string(),
            headword: ".Translation_spTop_enTohe".to_string(),
            part_of_speech: ".Translation_sp2Top_enTohe".to_string(),
            meaning: ".normal_translation_div".to_string(),
            sample_sentence: ".SampleSentences_text".to_string(),
        }
    }
}
