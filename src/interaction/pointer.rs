//! Screen-space to normalized-device-coordinate pointer tracking
//!
//! Keeps two independent pointer channels: the press channel, updated only
//! when a press event arrives, and the move channel, updated on every cursor
//! move regardless of drag state.

/// A pointer position in normalized device coordinates.
///
/// Both axes are in [-1, 1]: the top-left corner of the viewport maps to
/// (-1, 1), the bottom-right corner to (1, -1) and the center to (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    /// Converts a raw screen-space position into normalized device coordinates.
    ///
    /// The viewport dimensions must be non-zero; callers are expected to drop
    /// input events while the surface is zero-sized.
    pub fn from_screen(screen: (f32, f32), viewport: (f32, f32)) -> Self {
        let (sx, sy) = screen;
        let (width, height) = viewport;
        Self {
            x: (sx / width) * 2.0 - 1.0,
            y: -(sy / height) * 2.0 + 1.0,
        }
    }
}

/// Tracks press and move pointer positions in normalized device coordinates.
#[derive(Debug, Default)]
pub struct PointerTracker {
    press: PointerSample,
    moved: PointerSample,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press event and returns the resulting sample.
    pub fn record_press(&mut self, screen: (f32, f32), viewport: (f32, f32)) -> PointerSample {
        self.press = PointerSample::from_screen(screen, viewport);
        self.press
    }

    /// Records a move event and returns the resulting sample.
    ///
    /// Move tracking is unconditional: it happens whether or not a drag is
    /// in progress, so the drag tick always sees the latest cursor position.
    pub fn record_move(&mut self, screen: (f32, f32), viewport: (f32, f32)) -> PointerSample {
        self.moved = PointerSample::from_screen(screen, viewport);
        self.moved
    }

    /// The sample recorded by the most recent press event.
    pub fn press_sample(&self) -> PointerSample {
        self.press
    }

    /// The sample recorded by the most recent move event.
    pub fn move_sample(&self) -> PointerSample {
        self.moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f32, f32) = (800.0, 600.0);

    #[test]
    fn test_corner_mapping() {
        let top_left = PointerSample::from_screen((0.0, 0.0), VIEWPORT);
        assert_eq!(top_left.x, -1.0);
        assert_eq!(top_left.y, 1.0);

        let bottom_right = PointerSample::from_screen((800.0, 600.0), VIEWPORT);
        assert_eq!(bottom_right.x, 1.0);
        assert_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn test_center_maps_to_origin() {
        let center = PointerSample::from_screen((400.0, 300.0), VIEWPORT);
        assert_eq!(center.x, 0.0);
        assert_eq!(center.y, 0.0);
    }

    #[test]
    fn test_move_recording_is_idempotent() {
        let mut tracker = PointerTracker::new();
        let once = tracker.record_move((123.0, 456.0), VIEWPORT);
        let twice = tracker.record_move((123.0, 456.0), VIEWPORT);
        assert_eq!(once, twice);
        assert_eq!(tracker.move_sample(), once);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut tracker = PointerTracker::new();
        tracker.record_press((0.0, 0.0), VIEWPORT);
        tracker.record_move((800.0, 600.0), VIEWPORT);

        assert_eq!(tracker.press_sample(), PointerSample { x: -1.0, y: 1.0 });
        assert_eq!(tracker.move_sample(), PointerSample { x: 1.0, y: -1.0 });
    }
}
