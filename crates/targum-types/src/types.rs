use serde::{Deserialize, Serialize};

/// Identity of one popup session, increasing with every accepted lookup
pub type SessionId = u64;

/// Identity of one speech utterance
pub type UtteranceId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Text selected by the user, not yet cleaned
    Selection(String),
    /// Host page finished loading, deferred selections may be dispatched
    PageReady,
    LookupSettled {
        session: SessionId,
        result: LookupResult,
    },
    Ui(UiEvent),
    /// Speaker control of the card at this position; the host supplies the text
    SpeakCard(usize),
    SpeechFinished {
        utterance: UtteranceId,
        outcome: SpeechOutcome,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    HoverEnter,
    HoverLeave,
    /// Pointer pressed on the popup header
    DragStart(Point),
    DragMove(Point),
    /// Mouse-up, touch-end or touch-cancel
    DragEnd,
    Escape,
    OutsidePointer,
    CloseClicked,
    SpeakClicked { card: usize, text: String },
    /// Host window or page viewport changed size
    ViewportResized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Finished,
    Failed(String),
}

/// One dictionary entry scraped from a result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub source_word: String,
    /// Empty when the page gives no part of speech
    pub part_of_speech: String,
    pub target_meanings: Vec<String>,
    /// Inner markup of each sentence, emphasis tags included
    pub sample_sentences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Loading { query: String },
    Success {
        query: String,
        records: Vec<TranslationRecord>,
    },
    Failure { query: String },
}

impl LookupResult {
    pub fn query(&self) -> &str {
        match self {
            LookupResult::Loading { query }
            | LookupResult::Success { query, .. }
            | LookupResult::Failure { query } => query,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, LookupResult::Loading { .. })
    }
}

/// Pixel offset of the popup relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Session-scoped event subscriptions on the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Escape key
    Keydown,
    /// Pointer down outside the popup
    OutsidePointer,
    Hover,
    /// Pointer move and release while a drag is active
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeakerState {
    #[default]
    Idle,
    Speaking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub record: TranslationRecord,
    pub speaker: SpeakerState,
}

/// Declarative description of what the popup shows
#[derive(Debug, Clone, PartialEq)]
pub enum PopupView {
    Loading {
        query: String,
    },
    Results {
        query: String,
        cards: Vec<CardView>,
        full_results_url: String,
    },
    NoResults {
        query: String,
        full_results_url: String,
    },
    Error {
        query: String,
    },
}

impl PopupView {
    pub fn query(&self) -> &str {
        match self {
            PopupView::Loading { query }
            | PopupView::Results { query, .. }
            | PopupView::NoResults { query, .. }
            | PopupView::Error { query } => query,
        }
    }
}
