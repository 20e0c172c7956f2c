//! Popup placement within the viewport.

use targum_types::{Point, Position, Size};

/// Keep the whole surface on screen. A surface larger than the viewport is
/// pinned to the top-left corner.
pub fn clamp_position(position: Position, viewport: Size, surface: Size) -> Position {
    let max_left = (viewport.width - surface.width).max(0.0);
    let max_top = (viewport.height - surface.height).max(0.0);

    Position {
        top: position.top.clamp(0.0, max_top),
        left: position.left.clamp(0.0, max_left),
    }
}

/// Position after moving the pointer by `delta` during a drag
pub fn next_position(delta: Point, previous: Position, viewport: Size, surface: Size) -> Position {
    let moved = Position {
        top: previous.top + delta.y,
        left: previous.left + delta.x,
    };
    clamp_position(moved, viewport, surface)
}

/// First placement: top-right corner, `margin` pixels in from both edges
pub fn initial_position(viewport: Size, surface: Size, margin: f64) -> Position {
    let corner = Position {
        top: margin,
        left: viewport.width - surface.width - margin,
    };
    clamp_position(corner, viewport, surface)
}
