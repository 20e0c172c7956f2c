use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use targum_core::PopupController;
use targum_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::speech::CommandSpeech;
use crate::state::AppState;
use crate::surface::{TerminalSurface, TerminalViewport};

/// Application controller for task spawning and lifecycle
pub struct AppController {
    events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            // Selections, UI input, fetch and speech completions
            events: kanal::bounded_async(64),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let viewport = TerminalViewport::default();
        let popup = {
            let config = self.state.config.read().await;
            let surface = TerminalSurface::stdout(&config.popup, viewport.clone());
            let speech = CommandSpeech::new(&config.speech.command, self.events.0.clone());
            PopupController::new(&config, surface, speech)
        };

        // Event loop
        tasks.spawn(event_loop(
            popup,
            self.state.translator.clone(),
            self.events.1.clone(),
            self.events.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin watcher
        tasks.spawn(watcher_io(
            self.events.0.clone(),
            viewport,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Let deferred selections through, then look up `query` if given
    pub async fn page_ready(&self, query: Option<String>) -> anyhow::Result<()> {
        self.events.0.send(AppEvent::PageReady).await?;
        if let Some(query) = query {
            self.events.0.send(AppEvent::Selection(query)).await?;
        }
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
