use std::io::{self, Stdout, Write};
use std::sync::{Arc, RwLock};

use targum_config::popup::PopupConfig;
use targum_core::Surface;
use targum_types::{Listener, PopupView, Position, Size};

use crate::render::render_view;

/// Viewport the terminal starts with
pub const TERMINAL_VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};

/// Viewport size shared between the input reader and the surface
#[derive(Debug, Clone)]
pub struct TerminalViewport(Arc<RwLock<Size>>);

impl TerminalViewport {
    pub fn new(size: Size) -> Self {
        Self(Arc::new(RwLock::new(size)))
    }

    pub fn get(&self) -> Size {
        match self.0.read() {
            Ok(size) => *size,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set(&self, size: Size) {
        match self.0.write() {
            Ok(mut current) => *current = size,
            Err(poisoned) => *poisoned.into_inner() = size,
        }
    }
}

impl Default for TerminalViewport {
    fn default() -> Self {
        Self::new(TERMINAL_VIEWPORT)
    }
}

/// Prints popup views as text blocks
pub struct TerminalSurface<W> {
    out: W,
    viewport: TerminalViewport,
    size: Size,
    listeners: Vec<Listener>,
}

impl TerminalSurface<Stdout> {
    pub fn stdout(config: &PopupConfig, viewport: TerminalViewport) -> Self {
        Self::new(io::stdout(), config, viewport)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, config: &PopupConfig, viewport: TerminalViewport) -> Self {
        Self {
            out,
            viewport,
            size: Size {
                width: config.width,
                height: config.height,
            },
            listeners: Vec::new(),
        }
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to draw popup: {}", e);
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn viewport(&self) -> Size {
        self.viewport.get()
    }

    fn surface_size(&self) -> Size {
        self.size
    }

    fn mount(&mut self, view: &PopupView, position: Position) {
        let text = render_view(view, position);
        self.print(&text);
    }

    fn reposition(&mut self, position: Position) {
        self.print(&format!(
            "(popup moved to {:.0},{:.0})",
            position.left, position.top
        ));
    }

    fn unmount(&mut self) {
        self.print("(popup closed)");
    }

    fn attach(&mut self, listener: Listener) {
        tracing::trace!(?listener, "listener attached");
        self.listeners.push(listener);
    }

    fn detach(&mut self, listener: Listener) {
        tracing::trace!(?listener, "listener detached");
        self.listeners.retain(|l| *l != listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_and_close_are_printed() {
        let mut surface = TerminalSurface::new(
            Vec::new(),
            &PopupConfig::default(),
            TerminalViewport::default(),
        );

        surface.attach(Listener::Keydown);
        surface.mount(
            &PopupView::NoResults {
                query: "qwzx".to_string(),
                full_results_url: "https://www.morfix.co.il/qwzx".to_string(),
            },
            Position::default(),
        );
        surface.detach(Listener::Keydown);
        surface.unmount();

        let printed = String::from_utf8(surface.out.clone()).unwrap();
        assert!(printed.contains("No translations found for \"qwzx\""));
        assert!(printed.ends_with("(popup closed)\n"));
        assert!(surface.listeners.is_empty());
        assert_eq!(surface.surface_size().width, 350.0);
    }

    #[test]
    fn viewport_follows_shared_size() {
        let viewport = TerminalViewport::default();
        let surface =
            TerminalSurface::new(Vec::new(), &PopupConfig::default(), viewport.clone());
        assert_eq!(surface.viewport(), TERMINAL_VIEWPORT);

        let smaller = Size {
            width: 640.0,
            height: 480.0,
        };
        viewport.set(smaller);

        assert_eq!(surface.viewport(), smaller);
    }
}
