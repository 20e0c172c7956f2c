use targum_dictionary::emphasis_to_text;
use targum_types::{PopupView, Position, SpeakerState};

/// Text rendering of a popup for the terminal host
pub fn render_view(view: &PopupView, position: Position) -> String {
    let mut out = format!(
        "== Targumchik ======================= [{:.0},{:.0}]\n",
        position.left, position.top
    );

    match view {
        PopupView::Loading { query } => {
            out.push_str(&format!("Translating \"{query}\"...\n"));
        }
        PopupView::Results {
            cards,
            full_results_url,
            ..
        } => {
            for (index, card) in cards.iter().enumerate() {
                let record = &card.record;
                let speaker = match card.speaker {
                    SpeakerState::Idle => "🔊",
                    SpeakerState::Speaking => "🔈",
                };
                out.push_str(&format!("{}. {} {speaker}", index + 1, record.source_word));
                if !record.part_of_speech.is_empty() {
                    out.push_str(&format!(" ({})", record.part_of_speech));
                }
                out.push('\n');
                out.push_str(&format!("   {}\n", record.target_meanings.join(", ")));

                if !record.sample_sentences.is_empty() {
                    out.push_str("   Sample sentences:\n");
                    for sentence in &record.sample_sentences {
                        out.push_str(&format!("     {}\n", emphasis_to_text(sentence)));
                    }
                }
            }
            out.push_str(&format!("View full translation on Morfix: {full_results_url}\n"));
        }
        PopupView::NoResults {
            query,
            full_results_url,
        } => {
            out.push_str(&format!("No translations found for \"{query}\"\n"));
            out.push_str(&format!("View full translation on Morfix: {full_results_url}\n"));
        }
        PopupView::Error { query } => {
            out.push_str(&format!(
                "Sorry, couldn't translate \"{query}\". Please try again.\n"
            ));
        }
    }

    out.push_str("====================================");
    out
}

#[cfg(test)]
mod tests {
    use targum_types::{CardView, TranslationRecord};

    use super::*;

    #[test]
    fn results_list_cards_with_speaker_state() {
        let view = PopupView::Results {
            query: "dog".to_string(),
            cards: vec![CardView {
                record: TranslationRecord {
                    source_word: "dog".to_string(),
                    part_of_speech: "noun".to_string(),
                    target_meanings: vec!["כלב".to_string(), "כלבלב".to_string()],
                    sample_sentences: vec!["The <b>dog</b> sleeps.".to_string()],
                },
                speaker: SpeakerState::Speaking,
            }],
            full_results_url: "https://www.morfix.co.il/dog".to_string(),
        };

        let text = render_view(&view, Position::default());

        assert!(text.contains("1. dog 🔈 (noun)"));
        assert!(text.contains("כלב, כלבלב"));
        assert!(text.contains("The *dog* sleeps."));
        assert!(text.contains("https://www.morfix.co.il/dog"));
    }

    #[test]
    fn error_and_loading_messages() {
        let error = render_view(
            &PopupView::Error {
                query: "dog".to_string(),
            },
            Position::default(),
        );
        assert!(error.contains("Sorry, couldn't translate \"dog\". Please try again."));

        let loading = render_view(
            &PopupView::Loading {
                query: "dog".to_string(),
            },
            Position::default(),
        );
        assert!(loading.contains("Translating \"dog\"..."));
    }
}
