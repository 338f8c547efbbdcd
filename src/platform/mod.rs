//! Platform abstraction layer
//!
//! Viewport sizing is shared; the browser-specific pieces (image loading,
//! window size) live in [`web`].

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::Viewport;

/// Pixels kept free around the canvas on each axis
pub const VIEWPORT_MARGIN: f32 = 50.0;

/// Canvas size for a host window of the given inner size
pub fn viewport_for_window(inner_width: f32, inner_height: f32) -> Viewport {
    Viewport::new(inner_width - VIEWPORT_MARGIN, inner_height - VIEWPORT_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_applied() {
        assert_eq!(viewport_for_window(1280.0, 720.0), Viewport::new(1230.0, 670.0));
    }

    #[test]
    fn test_tiny_window_stays_positive() {
        let vp = viewport_for_window(10.0, 10.0);
        assert!(vp.width >= 1.0 && vp.height >= 1.0);
    }
}
