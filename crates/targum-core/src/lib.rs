pub mod geometry;
pub mod popup;
pub mod preprocess;
pub mod speech;
pub mod surface;
pub mod trigger;

pub use popup::{LookupTicket, PopupController, PopupSession, PopupStatus};
pub use speech::{SpeechEngine, SpeechError, Utterance};
pub use surface::Surface;
pub use trigger::TriggerGate;
