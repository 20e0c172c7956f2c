use scraper::Selector;
use targum_config::dictionary::DictionaryConfig;

#[derive(Debug, thiserror::Error)]
#[error("invalid {role} selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub role: &'static str,
    pub selector: String,
    pub reason: String,
}

/// Compiled selectors for one result page layout
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub(crate) entry: Selector,
    pub(crate) headword: Selector,
    pub(crate) part_of_speech: Selector,
    pub(crate) meaning: Selector,
    pub(crate) sample_sentence: Selector,
}

impl SelectorSet {
    pub fn from_config(config: &DictionaryConfig) -> Result<Self, SelectorError> {
        Ok(Self {
            entry: compile("entry", &config.entry)?,
            headword: compile("headword", &config.headword)?,
            part_of_speech: compile("part of speech", &config.part_of_speech)?,
            meaning: compile("meaning", &config.meaning)?,
            sample_sentence: compile("sample sentence", &config.sample_sentence)?,
        })
    }
}

fn compile(role: &'static str, selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        role,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selectors_compile() {
        assert!(SelectorSet::from_config(&DictionaryConfig::default()).is_ok());
    }

    #[test]
    fn broken_selector_names_its_role() {
        let config = DictionaryConfig {
            meaning: "div[".to_string(),
            ..DictionaryConfig::default()
        };

        let err = SelectorSet::from_config(&config).unwrap_err();
        assert_eq!(err.role, "meaning");
        assert_eq!(err.selector, "div[");
    }
}
