//! Popup lifecycle.
//!
//! A popup goes `closed -> loading -> shown -> closed`. At most one
//! [`PopupSession`] is live; every way out of `loading` or `shown` goes through
//! one teardown that unmounts the surface, detaches the session's listeners,
//! drops the dismiss deadline and silences any utterance.
//!
//! The controller never waits. Fetching and timers belong to the host, which
//! feeds settlements back tagged with the [`SessionId`] it was handed and calls
//! [`PopupController::tick`] once [`PopupController::dismiss_deadline`] passes.

use std::time::Duration;

use targum_config::Config;
use targum_config::network::NetworkConfig;
use targum_config::popup::PopupConfig;
use targum_config::speech::SpeechConfig;
use targum_types::{
    CardView, Listener, LookupResult, Point, PopupView, Position, SessionId, SpeakerState,
    SpeechOutcome, UiEvent, UtteranceId,
};
use tokio::time::Instant;

use crate::geometry;
use crate::speech::{SpeechEngine, Utterance};
use crate::surface::Surface;

/// Listeners every session holds from mount to teardown
const SESSION_LISTENERS: [Listener; 3] = [Listener::Keydown, Listener::OutsidePointer, Listener::Hover];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupStatus {
    Closed,
    Loading,
    Shown,
}

/// Handed out for an accepted lookup; the fetch result must come back with
/// the same session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub session: SessionId,
    pub query: String,
}

#[derive(Debug, Clone, Copy)]
struct ActiveUtterance {
    id: UtteranceId,
    card: usize,
}

/// State of the one live popup
#[derive(Debug)]
pub struct PopupSession {
    id: SessionId,
    status: PopupStatus,
    result: LookupResult,
    position: Position,
    hovered: bool,
    dismiss_deadline: Option<Instant>,
    /// Last pointer position while dragging
    drag_anchor: Option<Point>,
    speaking: Option<ActiveUtterance>,
    listeners: Vec<Listener>,
}

impl PopupSession {
    fn new(id: SessionId, query: &str, position: Position) -> Self {
        Self {
            id,
            status: PopupStatus::Loading,
            result: LookupResult::Loading {
                query: query.to_string(),
            },
            position,
            hovered: false,
            dismiss_deadline: None,
            drag_anchor: None,
            speaking: None,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> PopupStatus {
        self.status
    }

    pub fn result(&self) -> &LookupResult {
        &self.result
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn dismiss_deadline(&self) -> Option<Instant> {
        self.dismiss_deadline
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }
}

pub struct PopupController<S, V> {
    popup: PopupConfig,
    speech_config: SpeechConfig,
    network: NetworkConfig,
    surface: S,
    speech: V,
    session: Option<PopupSession>,
    last_session: SessionId,
    last_utterance: UtteranceId,
}

impl<S: Surface, V: SpeechEngine> PopupController<S, V> {
    pub fn new(config: &Config, surface: S, speech: V) -> Self {
        Self {
            popup: config.popup.clone(),
            speech_config: config.speech.clone(),
            network: config.network.clone(),
            surface,
            speech,
            session: None,
            last_session: 0,
            last_utterance: 0,
        }
    }

    pub fn status(&self) -> PopupStatus {
        self.session
            .as_ref()
            .map_or(PopupStatus::Closed, |session| session.status)
    }

    pub fn session(&self) -> Option<&PopupSession> {
        self.session.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn speech(&self) -> &V {
        &self.speech
    }

    pub fn dismiss_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(|session| session.dismiss_deadline)
    }

    /// Open a loading popup for `query`.
    ///
    /// Returns `None` without touching the current popup when the query is
    /// empty or another lookup is still loading.
    pub fn request_lookup(&mut self, query: &str) -> Option<LookupTicket> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty lookup");
            return None;
        }

        if self.status() == PopupStatus::Loading {
            tracing::debug!(query, "lookup already in flight, dropping request");
            return None;
        }

        self.teardown();

        self.last_session += 1;
        let id = self.last_session;
        let position = geometry::initial_position(
            self.surface.viewport(),
            self.surface.surface_size(),
            self.popup.margin,
        );
        self.session = Some(PopupSession::new(id, query, position));

        self.render();
        for listener in SESSION_LISTENERS {
            self.attach(listener);
        }

        tracing::info!(session = id, query, "lookup started");
        Some(LookupTicket {
            session: id,
            query: query.to_string(),
        })
    }

    /// Show the outcome of the lookup for `session` and start the dismiss
    /// timer. Settlements for any other session are stale and dropped.
    pub fn on_lookup_settled(
        &mut self,
        session: SessionId,
        result: LookupResult,
        now: Instant,
    ) -> bool {
        if !result.is_settled() {
            return false;
        }

        let dismiss_after = self.dismiss_after();
        let Some(current) = self
            .session
            .as_mut()
            .filter(|current| current.id == session && current.status == PopupStatus::Loading)
        else {
            tracing::debug!(session, "discarding stale lookup result");
            return false;
        };

        match &result {
            LookupResult::Success { records, .. } => {
                tracing::info!(session, entries = records.len(), "lookup succeeded")
            }
            _ => tracing::info!(session, "lookup failed"),
        }

        current.result = result;
        current.status = PopupStatus::Shown;
        current.dismiss_deadline = (!current.hovered).then(|| now + dismiss_after);

        self.render();
        true
    }

    /// Close the popup. Safe to call when nothing is open.
    pub fn request_close(&mut self) {
        if let Some(id) = self.teardown() {
            tracing::info!(session = id, "popup closed");
        }
    }

    /// Auto-close once the dismiss deadline has passed. Returns whether the
    /// popup was closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.session.as_ref().is_some_and(|session| {
            session.status == PopupStatus::Shown
                && !session.hovered
                && session.dismiss_deadline.is_some_and(|deadline| now >= deadline)
        });

        if expired && let Some(id) = self.teardown() {
            tracing::info!(session = id, "popup dismissed after timeout");
        }
        expired
    }

    pub fn on_hover_enter(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.hovered = true;
            session.dismiss_deadline = None;
        }
    }

    /// Leaving restarts the full dismiss duration rather than resuming
    pub fn on_hover_leave(&mut self, now: Instant) {
        let dismiss_after = self.dismiss_after();
        if let Some(session) = self.session.as_mut() {
            session.hovered = false;
            if session.status == PopupStatus::Shown {
                session.dismiss_deadline = Some(now + dismiss_after);
            }
        }
    }

    /// Pointer pressed on the header
    pub fn on_drag_start(&mut self, pointer: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.drag_anchor = Some(pointer);
        self.attach(Listener::Drag);
    }

    pub fn on_drag_move(&mut self, pointer: Point) {
        let viewport = self.surface.viewport();
        let surface = self.surface.surface_size();

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(anchor) = session.drag_anchor else {
            return;
        };

        let delta = Point {
            x: pointer.x - anchor.x,
            y: pointer.y - anchor.y,
        };
        session.position = geometry::next_position(delta, session.position, viewport, surface);
        session.drag_anchor = Some(pointer);

        let position = session.position;
        self.surface.reposition(position);
    }

    pub fn on_drag_end(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.drag_anchor = None;
        }
        self.detach(Listener::Drag);
    }

    pub fn on_viewport_resized(&mut self) {
        let viewport = self.surface.viewport();
        let surface = self.surface.surface_size();

        if let Some(session) = self.session.as_mut() {
            let position = geometry::clamp_position(session.position, viewport, surface);
            if position != session.position {
                session.position = position;
                self.surface.reposition(position);
            }
        }
    }

    /// Speak `text` for the speaker control of `card`, silencing whatever
    /// was playing before.
    pub fn on_speak_requested(&mut self, card: usize, text: &str) {
        let card_exists = self.session.as_ref().is_some_and(|session| {
            matches!(&session.result, LookupResult::Success { records, .. } if card < records.len())
        });
        if !card_exists {
            tracing::debug!(card, "speak request for unknown card");
            return;
        }

        self.speech.cancel();
        if let Some(session) = self.session.as_mut()
            && let Some(previous) = session.speaking.take()
        {
            tracing::debug!(utterance = previous.id, "cancelled previous utterance");
        }

        if !self.speech_config.enabled || !self.speech.is_supported() {
            tracing::warn!("speech synthesis is not supported");
            self.render();
            return;
        }

        self.last_utterance += 1;
        let utterance = Utterance::new(self.last_utterance, text, &self.speech_config);
        self.set_speaking(Some(ActiveUtterance {
            id: utterance.id,
            card,
        }));

        match self.speech.speak(&utterance) {
            Ok(()) => tracing::debug!(utterance = utterance.id, text, "speech started"),
            Err(e) => {
                tracing::warn!(utterance = utterance.id, "speech failed: {e}");
                self.set_speaking(None);
            }
        }
    }

    /// Playback of `utterance` ended or failed
    pub fn on_speech_finished(&mut self, utterance: UtteranceId, outcome: SpeechOutcome) {
        let active = self
            .session
            .as_ref()
            .and_then(|session| session.speaking)
            .is_some_and(|speaking| speaking.id == utterance);

        if !active {
            tracing::debug!(utterance, "ignoring completion of inactive utterance");
            return;
        }

        if let SpeechOutcome::Failed(reason) = &outcome {
            tracing::warn!(utterance, "speech error: {reason}");
        }
        self.set_speaking(None);
    }

    pub fn handle_ui(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::HoverEnter => self.on_hover_enter(),
            UiEvent::HoverLeave => self.on_hover_leave(now),
            UiEvent::DragStart(pointer) => self.on_drag_start(pointer),
            UiEvent::DragMove(pointer) => self.on_drag_move(pointer),
            UiEvent::DragEnd => self.on_drag_end(),
            UiEvent::Escape => {
                if self.is_listening(Listener::Keydown) {
                    self.request_close();
                }
            }
            UiEvent::OutsidePointer => {
                if self.is_listening(Listener::OutsidePointer) {
                    self.request_close();
                }
            }
            UiEvent::CloseClicked => self.request_close(),
            UiEvent::SpeakClicked { card, text } => self.on_speak_requested(card, &text),
            UiEvent::ViewportResized => self.on_viewport_resized(),
        }
    }

    /// What the surface should currently show
    pub fn view(&self) -> Option<PopupView> {
        let session = self.session.as_ref()?;

        let view = match &session.result {
            LookupResult::Loading { query } => PopupView::Loading {
                query: query.clone(),
            },
            LookupResult::Success { query, records } if records.is_empty() => {
                PopupView::NoResults {
                    query: query.clone(),
                    full_results_url: self.network.page_url(query),
                }
            }
            LookupResult::Success { query, records } => PopupView::Results {
                query: query.clone(),
                cards: records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| CardView {
                        record: record.clone(),
                        speaker: match session.speaking {
                            Some(active) if active.card == index => SpeakerState::Speaking,
                            _ => SpeakerState::Idle,
                        },
                    })
                    .collect(),
                full_results_url: self.network.page_url(query),
            },
            LookupResult::Failure { query } => PopupView::Error {
                query: query.clone(),
            },
        };

        Some(view)
    }

    fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.popup.dismiss_after_ms)
    }

    fn render(&mut self) {
        if let (Some(view), Some(session)) = (self.view(), self.session.as_ref()) {
            self.surface.mount(&view, session.position);
        }
    }

    fn set_speaking(&mut self, speaking: Option<ActiveUtterance>) {
        if let Some(session) = self.session.as_mut() {
            session.speaking = speaking;
            self.render();
        }
    }

    fn is_listening(&self, listener: Listener) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.listeners.contains(&listener))
    }

    fn attach(&mut self, listener: Listener) {
        if let Some(session) = self.session.as_mut()
            && !session.listeners.contains(&listener)
        {
            session.listeners.push(listener);
            self.surface.attach(listener);
        }
    }

    fn detach(&mut self, listener: Listener) {
        if let Some(session) = self.session.as_mut()
            && let Some(index) = session.listeners.iter().position(|l| *l == listener)
        {
            session.listeners.remove(index);
            self.surface.detach(listener);
        }
    }

    /// Drop the live session, returning its id
    fn teardown(&mut self) -> Option<SessionId> {
        let mut session = self.session.take()?;

        if session.speaking.take().is_some() {
            self.speech.cancel();
        }
        for listener in session.listeners.drain(..) {
            self.surface.detach(listener);
        }
        self.surface.unmount();

        tracing::debug!(session = session.id, "session torn down");
        Some(session.id)
    }
}
