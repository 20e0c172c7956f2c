use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use targum_core::{PopupController, SpeechEngine, Surface, TriggerGate};
use targum_translator::Translator;
use targum_types::{AppEvent, PopupView, UiEvent};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub mod lookup;

use lookup::start_lookup;

/// App's main loop
///
/// Owns the popup controller; every state change happens here, in order.
pub async fn event_loop<S, V>(
    mut popup: PopupController<S, V>,
    translator: Arc<dyn Translator>,
    events_rx: AsyncReceiver<AppEvent>,
    events_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    S: Surface + Send,
    V: SpeechEngine + Send,
{
    let mut gate = TriggerGate::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let deadline = popup.dismiss_deadline();

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Stopping");
                break;
            }
            _ = sleep_until_deadline(deadline) => {
                popup.tick(Instant::now());
            }
            event = events_rx.recv() => {
                let event = event?;
                handle_events(&mut popup, &mut gate, &translator, &events_tx, event);
            }
        }
    }

    popup.request_close();
    Ok(())
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn handle_events<S, V>(
    popup: &mut PopupController<S, V>,
    gate: &mut TriggerGate,
    translator: &Arc<dyn Translator>,
    events_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) where
    S: Surface,
    V: SpeechEngine,
{
    tracing::debug!(
        "[EVENT_LOOP] EVENT RECEIVED: {:?}",
        std::mem::discriminant(&event)
    );
    match event {
        AppEvent::Selection(text) => {
            if let Some(query) = gate.offer(&text) {
                start_lookup(popup, translator, events_tx, &query);
            }
        }
        AppEvent::PageReady => {
            tracing::debug!("Page ready");
            if let Some(query) = gate.mark_ready() {
                start_lookup(popup, translator, events_tx, &query);
            }
        }
        AppEvent::LookupSettled { session, result } => {
            popup.on_lookup_settled(session, result, Instant::now());
        }
        AppEvent::Ui(event) => popup.handle_ui(event, Instant::now()),
        AppEvent::SpeakCard(card) => match card_text(popup, card) {
            Some(text) => popup.handle_ui(UiEvent::SpeakClicked { card, text }, Instant::now()),
            None => tracing::warn!("No card {} to speak", card + 1),
        },
        AppEvent::SpeechFinished { utterance, outcome } => {
            popup.on_speech_finished(utterance, outcome);
        }
    }
}

/// Headword shown on the card at `card`
fn card_text<S, V>(popup: &PopupController<S, V>, card: usize) -> Option<String>
where
    S: Surface,
    V: SpeechEngine,
{
    match popup.view()? {
        PopupView::Results { cards, .. } => cards
            .into_iter()
            .nth(card)
            .map(|card| card.record.source_word),
        _ => None,
    }
}
