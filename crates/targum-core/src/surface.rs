use targum_types::{Listener, PopupView, Position, Size};

/// The host's rendering layer for the popup
///
/// The controller only ever describes what to show; the host owns drawing and
/// reports pointer and keyboard activity back as `UiEvent`s.
pub trait Surface {
    fn viewport(&self) -> Size;

    /// Measured size of the popup
    fn surface_size(&self) -> Size;

    /// Show `view` at `position`, replacing whatever was shown before
    fn mount(&mut self, view: &PopupView, position: Position);

    fn reposition(&mut self, position: Position);

    fn unmount(&mut self);

    fn attach(&mut self, listener: Listener);

    fn detach(&mut self, listener: Listener);
}
