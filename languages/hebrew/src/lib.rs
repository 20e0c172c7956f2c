pub mod translator;

pub use translator::MorfixTranslator;
