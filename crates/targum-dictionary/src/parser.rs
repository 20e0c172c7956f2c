use scraper::{ElementRef, Html};
use targum_config::dictionary::DictionaryConfig;
use targum_types::TranslationRecord;

use crate::selectors::{SelectorError, SelectorSet};

/// Extracts translation entries from a result page
#[derive(Debug, Clone)]
pub struct EntryParser {
    selectors: SelectorSet,
}

impl EntryParser {
    pub fn new(selectors: SelectorSet) -> Self {
        Self { selectors }
    }

    pub fn from_config(config: &DictionaryConfig) -> Result<Self, SelectorError> {
        SelectorSet::from_config(config).map(Self::new)
    }

    /// Entries in document order. Blocks without a headword or without any
    /// non-empty meaning are skipped; input that is not markup yields nothing.
    pub fn parse(&self, html: &str) -> Vec<TranslationRecord> {
        let document = Html::parse_document(html);

        let mut skipped = 0usize;
        let records: Vec<TranslationRecord> = document
            .select(&self.selectors.entry)
            .filter_map(|block| {
                let record = self.parse_block(block);
                if record.is_none() {
                    skipped += 1;
                }
                record
            })
            .collect();

        tracing::debug!(entries = records.len(), skipped, "parsed result page");
        records
    }

    fn parse_block(&self, block: ElementRef<'_>) -> Option<TranslationRecord> {
        let source_word = block
            .select(&self.selectors.headword)
            .next()
            .map(inner_text)
            .filter(|text| !text.is_empty())?;

        let target_meanings: Vec<String> = block
            .select(&self.selectors.meaning)
            .map(inner_text)
            .filter(|text| !text.is_empty())
            .collect();

        if target_meanings.is_empty() {
            return None;
        }

        let part_of_speech = block
            .select(&self.selectors.part_of_speech)
            .next()
            .map(inner_text)
            .unwrap_or_default();

        let sample_sentences = block
            .select(&self.selectors.sample_sentence)
            .map(|sentence| sentence.inner_html().trim().to_string())
            .filter(|markup| !markup.is_empty())
            .collect();

        Some(TranslationRecord {
            source_word,
            part_of_speech,
            target_meanings,
            sample_sentences,
        })
    }
}

/// Rendered text of an element with runs of whitespace collapsed
fn inner_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EntryParser {
        EntryParser::from_config(&DictionaryConfig::default()).unwrap()
    }

    fn entry(headword: &str, pos: Option<&str>, meanings: &[&str], samples: &[&str]) -> String {
        let mut block = String::from(r#"<div class="Translation_content_enTohe">"#);
        block.push_str(&format!(
            r#"<div class="Translation_spTop_enTohe">{headword}</div>"#
        ));
        if let Some(pos) = pos {
            block.push_str(&format!(
                r#"<div class="Translation_sp2Top_enTohe">{pos}</div>"#
            ));
        }
        for meaning in meanings {
            block.push_str(&format!(
                r#"<div class="normal_translation_div">{meaning}</div>"#
            ));
        }
        for sample in samples {
            block.push_str(&format!(r#"<div class="SampleSentences_text">{sample}</div>"#));
        }
        block.push_str("</div>");
        block
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body><main>{}</main></body></html>", blocks.concat())
    }

    #[test]
    fn single_entry_for_dog() {
        let html = page(&[entry("dog", Some("noun"), &["כלב"], &[])]);

        let records = parser().parse(&html);

        assert_eq!(
            records,
            vec![TranslationRecord {
                source_word: "dog".to_string(),
                part_of_speech: "noun".to_string(),
                target_meanings: vec!["כלב".to_string()],
                sample_sentences: vec![],
            }]
        );
    }

    #[test]
    fn no_entry_blocks_is_empty() {
        assert!(parser().parse("").is_empty());
        assert!(parser().parse("not markup at all <<<>>").is_empty());
        assert!(parser().parse("<html><body><p>No results</p></body></html>").is_empty());
    }

    #[test]
    fn incomplete_blocks_are_skipped_in_order() {
        let missing_headword = r#"<div class="Translation_content_enTohe">
                <div class="normal_translation_div">חתול</div>
            </div>"#
            .to_string();
        let blank_meanings = entry("cat", None, &["  ", ""], &[]);
        let html = page(&[
            entry("run", Some("verb"), &["רץ", "ריצה"], &[]),
            missing_headword,
            blank_meanings,
            entry("runner", None, &["רץ"], &[]),
        ]);

        let words: Vec<String> = parser()
            .parse(&html)
            .into_iter()
            .map(|r| r.source_word)
            .collect();

        assert_eq!(words, vec!["run", "runner"]);
    }

    #[test]
    fn meanings_keep_order_and_duplicates() {
        let html = page(&[entry("set", None, &["קבוצה", " \n ", "מערכת", "קבוצה"], &[])]);

        let records = parser().parse(&html);

        assert_eq!(records[0].target_meanings, vec!["קבוצה", "מערכת", "קבוצה"]);
        assert_eq!(records[0].part_of_speech, "");
    }

    #[test]
    fn sample_sentences_keep_markup() {
        let html = page(&[entry(
            "dog",
            None,
            &["כלב"],
            &["The <b>dog</b> barked &amp; ran.", "   "],
        )]);

        let records = parser().parse(&html);

        assert_eq!(
            records[0].sample_sentences,
            vec!["The <b>dog</b> barked &amp; ran."]
        );
    }

    #[test]
    fn text_whitespace_is_collapsed() {
        let html = page(&[entry(
            "\n  look   <span>up</span>\n",
            None,
            &["<span>חיפש</span>\n   <span>בדק</span>"],
            &[],
        )]);

        let records = parser().parse(&html);

        assert_eq!(records[0].source_word, "look up");
        assert_eq!(records[0].target_meanings, vec!["חיפש בדק"]);
    }

    #[test]
    fn custom_selectors_drive_extraction() {
        let config = DictionaryConfig {
            entry: "article.entry".to_string(),
            headword: "h2".to_string(),
            part_of_speech: "em".to_string(),
            meaning: "li".to_string(),
            sample_sentence: "blockquote".to_string(),
        };
        let html = r#"<article class="entry"><h2>tree</h2><em>noun</em>
            <ul><li>עץ</li><li>אילן</li></ul></article>"#;

        let records = EntryParser::from_config(&config).unwrap().parse(html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_word, "tree");
        assert_eq!(records[0].target_meanings, vec!["עץ", "אילן"]);
    }
}
