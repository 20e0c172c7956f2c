use targum_types::TranslationRecord;

/// Dictionary lookup provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Page a user can open for the full results of `query`
    fn page_url(&self, query: &str) -> String;

    /// Fetch the result page for `query` once and extract its entries.
    /// An empty vector means the page had no entries, not a failure.
    async fn lookup(&self, query: &str) -> Result<Vec<TranslationRecord>, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid page layout: {0}")]
    Layout(String),
}
