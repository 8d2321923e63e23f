//! Interaction state machine.
//!
//! Pointer input arrives as discrete [`PointerEvent`] messages and is
//! consumed synchronously; the host decides which moves are drags (it owns
//! the button state). The controller owns the only mutable core state: the
//! accumulated rotation angles and the normalized cursor position.
//!
//! ## State machine
//!
//! ```text
//!              Pressed (records anchor)
//!        Idle ─────────────────────────► Dragging
//!          ▲                                │
//!          │        Pressed (re-anchors)    │ Dragged: delta vs anchor,
//!          └───── no release transition ────┘ rotate, re-anchor
//! ```
//!
//! There is deliberately no release transition: the anchor persists until
//! the next press re-anchors it, matching the viewer's original behavior.
//! `Moved` refreshes the cursor in any state and never rotates.

use crate::math::Vec2;

/// Rotation applied per pixel of drag delta.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// A discrete pointer input message.
///
/// Positions are raw window coordinates in pixels (y-down, as delivered by
/// the windowing layer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button press; records the drag anchor.
    Pressed {
        /// Press location.
        position: Vec2,
    },
    /// A move while the host considers the pointer dragging.
    Dragged {
        /// Current location.
        position: Vec2,
    },
    /// A move without a drag in progress.
    Moved {
        /// Current location.
        position: Vec2,
    },
}

/// Accumulated view rotation angles, in radians.
///
/// Unbounded accumulation; no wraparound is required since the
/// trigonometric functions consuming these are periodic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    /// Rotation about the X axis.
    pub about_x: f32,
    /// Rotation about the Y axis.
    pub about_y: f32,
}

/// Window extent used to normalize cursor positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, clamping degenerate extents to one pixel so the
    /// normalization and aspect math never divide by zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Width / height ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Maps a window position to normalized device range `[-1, 1]`.
    ///
    /// Window coordinates are y-down; NDC is y-up, so y is flipped.
    #[must_use]
    pub fn normalize(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            (position.x / self.width) * 2.0 - 1.0,
            1.0 - (position.y / self.height) * 2.0,
        )
    }
}

/// Converts pointer events into persistent rotation angles and a
/// normalized cursor position.
///
/// All transitions are synchronous and non-blocking; the renderer reads
/// [`rotation`](Self::rotation) and [`cursor`](Self::cursor) once per tick.
#[derive(Debug, Clone)]
pub struct InteractionController {
    rotation: RotationState,
    cursor: Vec2,
    /// Drag anchor; `Some` while in the Dragging state.
    anchor: Option<Vec2>,
    viewport: Viewport,
}

impl InteractionController {
    /// Creates a controller at Idle with a centered cursor.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            rotation: RotationState::default(),
            cursor: Vec2::ZERO,
            anchor: None,
            viewport,
        }
    }

    /// Consumes one pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed { position } => {
                self.anchor = Some(position);
            }
            PointerEvent::Dragged { position } => {
                let Some(anchor) = self.anchor else {
                    // Drag without a press recorded: nothing to measure
                    // against, matching the original's early return.
                    return;
                };
                let dx = position.x - anchor.x;
                let dy = position.y - anchor.y;
                self.rotation.about_y -= dx * DRAG_SENSITIVITY;
                self.rotation.about_x -= dy * DRAG_SENSITIVITY;
                self.anchor = Some(position);
                self.cursor = self.viewport.normalize(position);
            }
            PointerEvent::Moved { position } => {
                self.cursor = self.viewport.normalize(position);
                tracing::trace!(x = self.cursor.x, y = self.cursor.y, "cursor moved");
            }
        }
    }

    /// Updates the viewport extent after a window resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport extent.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Accumulated rotation angles.
    #[must_use]
    pub const fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Cursor position in `[-1, 1]` NDC.
    #[must_use]
    pub const fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Returns true once a drag anchor has been recorded.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn controller() -> InteractionController {
        InteractionController::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_drag_rotates_by_sensitivity_scaled_delta() {
        let mut ctl = controller();

        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(100.0, 100.0),
        });
        ctl.handle(PointerEvent::Dragged {
            position: Vec2::new(110.0, 90.0),
        });

        // dx = 10, dy = -10
        assert!((ctl.rotation().about_y - -0.1).abs() < EPSILON);
        assert!((ctl.rotation().about_x - 0.1).abs() < EPSILON);

        // Second drag measures against the new anchor (110, 90).
        ctl.handle(PointerEvent::Dragged {
            position: Vec2::new(115.0, 80.0),
        });

        // dx = 5, dy = -10
        assert!((ctl.rotation().about_y - -0.15).abs() < EPSILON);
        assert!((ctl.rotation().about_x - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_move_never_rotates() {
        let mut ctl = controller();

        ctl.handle(PointerEvent::Moved {
            position: Vec2::new(400.0, 300.0),
        });
        assert_eq!(ctl.rotation(), RotationState::default());

        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(100.0, 100.0),
        });
        ctl.handle(PointerEvent::Moved {
            position: Vec2::new(300.0, 300.0),
        });
        assert_eq!(ctl.rotation(), RotationState::default());
    }

    #[test]
    fn test_press_re_anchors_without_rotating() {
        let mut ctl = controller();

        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(100.0, 100.0),
        });
        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(500.0, 500.0),
        });
        assert_eq!(ctl.rotation(), RotationState::default());

        // Delta is measured from the newest anchor.
        ctl.handle(PointerEvent::Dragged {
            position: Vec2::new(510.0, 500.0),
        });
        assert!((ctl.rotation().about_y - -0.1).abs() < EPSILON);
        assert!(ctl.rotation().about_x.abs() < EPSILON);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut ctl = controller();
        ctl.handle(PointerEvent::Dragged {
            position: Vec2::new(200.0, 200.0),
        });

        assert_eq!(ctl.rotation(), RotationState::default());
        assert_eq!(ctl.cursor(), Vec2::ZERO);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_cursor_normalization_is_ndc() {
        let mut ctl = controller();

        // Center of an 800x600 window.
        ctl.handle(PointerEvent::Moved {
            position: Vec2::new(400.0, 300.0),
        });
        assert!(ctl.cursor().x.abs() < EPSILON);
        assert!(ctl.cursor().y.abs() < EPSILON);

        // Top-right corner maps to (1, 1): window y is flipped into NDC.
        ctl.handle(PointerEvent::Moved {
            position: Vec2::new(800.0, 0.0),
        });
        assert!((ctl.cursor().x - 1.0).abs() < EPSILON);
        assert!((ctl.cursor().y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_drag_updates_cursor_too() {
        let mut ctl = controller();
        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(0.0, 0.0),
        });
        ctl.handle(PointerEvent::Dragged {
            position: Vec2::new(800.0, 600.0),
        });

        assert!((ctl.cursor().x - 1.0).abs() < EPSILON);
        assert!((ctl.cursor().y - -1.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_viewport_is_clamped() {
        let viewport = Viewport::new(800.0, 0.0);
        assert!(viewport.aspect().is_finite());

        let normalized = viewport.normalize(Vec2::new(400.0, 0.0));
        assert!(normalized.x.is_finite());
        assert!(normalized.y.is_finite());
    }

    #[test]
    fn test_angles_accumulate_without_wraparound() {
        let mut ctl = controller();
        ctl.handle(PointerEvent::Pressed {
            position: Vec2::new(0.0, 0.0),
        });
        for i in 1..=1000 {
            #[allow(clippy::cast_precision_loss)]
            ctl.handle(PointerEvent::Dragged {
                position: Vec2::new(i as f32 * 10.0, 0.0),
            });
        }

        // 999 drags of 10px plus the first of 10px: 1000 * 10 * 0.01 = 100.
        assert!((ctl.rotation().about_y - -100.0).abs() < 1e-3);
    }
}
