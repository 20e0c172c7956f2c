use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default selection cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Selections spanning lines arrive with newlines and runs of spaces
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_trimmed_and_collapsed() {
        let text = SelectionPreprocessor.process("  look\n   up\r\n ");
        assert_eq!(text, "look up");
    }

    #[test]
    fn compatibility_forms_are_folded() {
        assert_eq!(SelectionPreprocessor.process("ﬁne"), "fine");
        assert_eq!(SelectionPreprocessor.process(" \n\t "), "");
    }
}
