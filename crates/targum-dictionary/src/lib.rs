//! Scraping of dictionary result pages into [`TranslationRecord`]s.
//!
//! The parser knows nothing about a particular site. Which elements make up
//! an entry is decided by a [`SelectorSet`] built from configuration, so a
//! layout change on the site means new selector strings, not new code.
//!
//! [`TranslationRecord`]: targum_types::TranslationRecord

mod markup;
mod parser;
mod selectors;

pub use markup::emphasis_to_text;
pub use parser::EntryParser;
pub use selectors::{SelectorError, SelectorSet};
