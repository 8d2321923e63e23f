//! Window-event to pointer-message mapping.
//!
//! The windowing layer reports cursor motion and button changes as
//! separate events with no drag notion; the tracker owns the button state
//! and decides whether a motion is a drag. The controller itself stays
//! free of button bookkeeping and has no release transition — a release
//! here simply stops producing `Dragged` messages.

use lattice_core::interaction::PointerEvent;
use lattice_core::math::Vec2;

/// Tracks pointer button state and turns raw window events into
/// [`PointerEvent`] messages.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    left_button_down: bool,
    last_position: Vec2,
}

impl PointerTracker {
    /// Creates a tracker with the button up and the pointer at origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a cursor motion at window position `(x, y)`.
    ///
    /// Motion while the left button is held is a drag; otherwise a plain
    /// move.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        let position = Vec2::new(x, y);
        self.last_position = position;
        if self.left_button_down {
            PointerEvent::Dragged { position }
        } else {
            PointerEvent::Moved { position }
        }
    }

    /// Consumes a left-button state change.
    ///
    /// A press anchors a drag at the last known cursor position; a
    /// release produces no message at all.
    pub fn left_button_changed(&mut self, pressed: bool) -> Option<PointerEvent> {
        self.left_button_down = pressed;
        pressed.then_some(PointerEvent::Pressed {
            position: self.last_position,
        })
    }

    /// True while the left button is held.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.left_button_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_without_button_is_a_move() {
        let mut tracker = PointerTracker::new();
        let event = tracker.cursor_moved(10.0, 20.0);
        assert_eq!(
            event,
            PointerEvent::Moved {
                position: Vec2::new(10.0, 20.0),
            }
        );
    }

    #[test]
    fn test_press_anchors_at_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(100.0, 100.0);

        let event = tracker.left_button_changed(true);
        assert_eq!(
            event,
            Some(PointerEvent::Pressed {
                position: Vec2::new(100.0, 100.0),
            })
        );
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_motion_while_held_is_a_drag() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(100.0, 100.0);
        tracker.left_button_changed(true);

        let event = tracker.cursor_moved(110.0, 90.0);
        assert_eq!(
            event,
            PointerEvent::Dragged {
                position: Vec2::new(110.0, 90.0),
            }
        );
    }

    #[test]
    fn test_release_is_silent_and_ends_dragging() {
        let mut tracker = PointerTracker::new();
        tracker.left_button_changed(true);

        assert_eq!(tracker.left_button_changed(false), None);
        assert!(!tracker.is_dragging());

        // Motion after the release degrades to a plain move.
        let event = tracker.cursor_moved(50.0, 50.0);
        assert!(matches!(event, PointerEvent::Moved { .. }));
    }
}
