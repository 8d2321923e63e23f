//! # Render Sequence Integration Test
//!
//! Proves the frame renderer drives the backend through the exact
//! bind-and-draw sequence, frame after frame, against the recording
//! backend.

use lattice_core::config::CameraConfig;
use lattice_core::interaction::{InteractionController, PointerEvent, Viewport};
use lattice_core::lattice::PointLattice;
use lattice_core::math::Vec2;
use lattice_rendering::backend::{RecordedCall, RecordingBackend, CURSOR_SLOT, TRANSFORM_SLOT};
use lattice_rendering::{ClearColor, FrameRenderer};

fn build_renderer() -> FrameRenderer<RecordingBackend> {
    let lattice = PointLattice::generate(10, -0.7, 0.7).unwrap();
    FrameRenderer::new(
        RecordingBackend::new(),
        &lattice,
        CameraConfig::default(),
        ClearColor::BLACK,
    )
    .unwrap()
}

/// Position of the first matching call in the log.
fn index_of(log: &[RecordedCall], predicate: impl Fn(&RecordedCall) -> bool) -> usize {
    log.iter().position(predicate).expect("call not found")
}

#[test]
fn test_full_frame_sequence() {
    let mut renderer = build_renderer();
    let viewport = Viewport::new(1280.0, 720.0);
    let mut controller = InteractionController::new(viewport);

    // Drag the view a little, then render one tick.
    controller.handle(PointerEvent::Pressed {
        position: Vec2::new(100.0, 100.0),
    });
    controller.handle(PointerEvent::Dragged {
        position: Vec2::new(110.0, 90.0),
    });

    assert!(renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect()));

    let log = &renderer.backend_mut().log;

    // The uniform overwrite happens before the surface request; the draw
    // happens inside the pass, before the submit.
    let write = index_of(log, |c| matches!(c, RecordedCall::WriteBuffer { .. }));
    let acquire = index_of(log, |c| matches!(c, RecordedCall::AcquireSurface { .. }));
    let begin = index_of(log, |c| matches!(c, RecordedCall::BeginPass { .. }));
    let draw = index_of(log, |c| matches!(c, RecordedCall::DrawPoints { .. }));
    let submit = index_of(log, |c| matches!(c, RecordedCall::Submit));

    assert!(write < acquire);
    assert!(acquire < begin);
    assert!(begin < draw);
    assert!(draw < submit);

    // One point draw covering the whole lattice.
    assert_eq!(
        log[draw],
        RecordedCall::DrawPoints {
            start: 0,
            count: 1000,
        }
    );

    // Transform and cursor ride their contract slots.
    assert!(log.iter().any(|c| matches!(
        c,
        RecordedCall::BindUniform { slot, .. } if *slot == TRANSFORM_SLOT
    )));
    assert!(log.iter().any(|c| matches!(
        c,
        RecordedCall::BindTransient { slot, .. } if *slot == CURSOR_SLOT
    )));
}

#[test]
fn test_cursor_bytes_follow_the_latest_move() {
    let mut renderer = build_renderer();
    let viewport = Viewport::new(800.0, 600.0);
    let mut controller = InteractionController::new(viewport);

    // Move to the top-right corner: NDC (1, 1).
    controller.handle(PointerEvent::Moved {
        position: Vec2::new(800.0, 0.0),
    });
    renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect());

    let transient = renderer
        .backend_mut()
        .calls_matching(|c| matches!(c, RecordedCall::BindTransient { .. }));
    let RecordedCall::BindTransient { bytes, .. } = transient[0] else {
        unreachable!();
    };
    let floats: &[f32] = bytemuck::cast_slice(bytes);
    assert!((floats[0] - 1.0).abs() < 1e-6);
    assert!((floats[1] - 1.0).abs() < 1e-6);
}

#[test]
fn test_backpressure_then_recovery_across_ticks() {
    let mut renderer = build_renderer();
    let viewport = Viewport::new(1280.0, 720.0);
    let controller = InteractionController::new(viewport);

    renderer.backend_mut().starve_surface = true;
    assert!(!renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect()));
    assert!(!renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect()));

    renderer.backend_mut().starve_surface = false;
    assert!(renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect()));

    let stats = renderer.stats();
    assert_eq!(stats.frames_skipped, 2);
    assert_eq!(stats.frames_rendered, 1);

    // Skipped ticks never opened a pass.
    let begins = renderer
        .backend_mut()
        .calls_matching(|c| matches!(c, RecordedCall::BeginPass { .. }));
    assert_eq!(begins.len(), 1);
}

#[test]
fn test_every_tick_observes_current_controller_state() {
    let mut renderer = build_renderer();
    let viewport = Viewport::new(1280.0, 720.0);
    let mut controller = InteractionController::new(viewport);

    renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect());

    controller.handle(PointerEvent::Pressed {
        position: Vec2::new(0.0, 0.0),
    });
    controller.handle(PointerEvent::Dragged {
        position: Vec2::new(200.0, 0.0),
    });
    renderer.tick(controller.rotation(), controller.cursor(), viewport.aspect());

    let writes = renderer
        .backend_mut()
        .calls_matching(|c| matches!(c, RecordedCall::WriteBuffer { .. }));
    assert_eq!(writes.len(), 2);

    let RecordedCall::WriteBuffer { bytes: before, .. } = writes[0] else {
        unreachable!();
    };
    let RecordedCall::WriteBuffer { bytes: after, .. } = writes[1] else {
        unreachable!();
    };
    assert_ne!(before, after, "rotation must reach the uniform slot");
}
