use std::sync::Arc;

use targum_config::Config;
use targum_translator::Translator;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    pub fn new(config: Config, translator: Arc<dyn Translator>) -> Self {
        let metadata = translator.metadata();
        tracing::info!(
            "Using {} ({} -> {})",
            metadata.name,
            metadata.from,
            metadata.to
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            translator,
        }
    }
}
