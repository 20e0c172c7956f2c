use crate::preprocess::{Preprocessor, SelectionPreprocessor};

/// Holds selections back until the host page is ready for a popup
///
/// Only the latest selection made before the page is ready is kept.
pub struct TriggerGate<P = SelectionPreprocessor> {
    preprocessor: P,
    ready: bool,
    pending: Option<String>,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self::with_preprocessor(SelectionPreprocessor)
    }
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Preprocessor> TriggerGate<P> {
    pub fn with_preprocessor(preprocessor: P) -> Self {
        Self {
            preprocessor,
            ready: false,
            pending: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Cleaned query to look up now, if any
    pub fn offer(&mut self, selection: &str) -> Option<String> {
        let query = self.preprocessor.process(selection);
        if query.is_empty() {
            tracing::debug!("ignoring empty selection");
            return None;
        }

        if self.ready {
            Some(query)
        } else {
            tracing::debug!(%query, "page not ready, deferring lookup");
            self.pending = Some(query);
            None
        }
    }

    /// Mark the page ready and release the deferred selection
    pub fn mark_ready(&mut self) -> Option<String> {
        self.ready = true;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_gate_passes_cleaned_text() {
        let mut gate = TriggerGate::new();
        assert_eq!(gate.mark_ready(), None);

        assert_eq!(gate.offer("  dog \n"), Some("dog".to_string()));
        assert_eq!(gate.offer("   "), None);
    }

    #[test]
    fn selection_waits_for_ready_page() {
        let mut gate = TriggerGate::new();

        assert_eq!(gate.offer("cat"), None);
        assert_eq!(gate.offer("dog"), None);
        assert!(!gate.is_ready());

        assert_eq!(gate.mark_ready(), Some("dog".to_string()));
        assert_eq!(gate.mark_ready(), None);
    }
}
