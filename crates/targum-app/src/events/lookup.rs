use std::sync::Arc;

use kanal::AsyncSender;
use targum_core::{PopupController, SpeechEngine, Surface};
use targum_translator::Translator;
use targum_types::{AppEvent, LookupResult};

/// Open the popup for `query` and fetch in the background.
///
/// The result is posted back as `LookupSettled` for the session it was started
/// for; the popup drops it if another session has taken over by then.
pub fn start_lookup<S, V>(
    popup: &mut PopupController<S, V>,
    translator: &Arc<dyn Translator>,
    events_tx: &AsyncSender<AppEvent>,
    query: &str,
) where
    S: Surface,
    V: SpeechEngine,
{
    let Some(ticket) = popup.request_lookup(query) else {
        return;
    };

    let translator = translator.clone();
    let tx = events_tx.clone();
    tokio::spawn(async move {
        let result = fetch(translator.as_ref(), ticket.query).await;
        if let Err(e) = tx
            .send(AppEvent::LookupSettled {
                session: ticket.session,
                result,
            })
            .await
        {
            tracing::error!("Failed to deliver lookup result: {}", e);
        }
    });
}

/// One fetch attempt, failures folded into `LookupResult::Failure`
pub async fn fetch(translator: &dyn Translator, query: String) -> LookupResult {
    match translator.lookup(&query).await {
        Ok(records) => LookupResult::Success { query, records },
        Err(e) => {
            tracing::warn!("Lookup for '{}' failed: {}", query, e);
            LookupResult::Failure { query }
        }
    }
}
