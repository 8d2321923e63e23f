//! # LATTICE Viewer
//!
//! Interactive 3D point-lattice viewer.
//!
//! Controls:
//! - Drag with the left mouse button to rotate the lattice
//! - Move the mouse to shift the point tint
//! - ESC to exit

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use lattice::PointerTracker;
use lattice_core::{InteractionController, PointLattice, ViewerConfig, Viewport};
use lattice_rendering::{ClearColor, FrameRenderer, FrameScheduler, WgpuBackend};

fn main() {
    if let Err(error) = run() {
        eprintln!("[FATAL] {error}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("[STARTUP] LATTICE viewer");

    let config = ViewerConfig::load_or_default(Path::new("lattice.toml"))?;
    println!(
        "[CONFIG] {n}^3 points over [{min}, {max}], {fps} fps target",
        n = config.lattice.samples_per_axis,
        min = config.lattice.min,
        max = config.lattice.max,
        fps = config.target_fps,
    );

    let lattice = PointLattice::generate(
        config.lattice.samples_per_axis,
        config.lattice.min,
        config.lattice.max,
    )?;
    println!("[LATTICE] {} points generated", lattice.point_count());

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)?,
    );

    println!("[GPU] Initializing...");
    let backend = WgpuBackend::new(window.clone())?;
    let mut renderer = FrameRenderer::new(
        backend,
        &lattice,
        config.camera,
        ClearColor::from_array(config.clear_color),
    )?;
    println!("[GPU] Pipeline ready");

    let size = window.inner_size();
    #[allow(clippy::cast_precision_loss)]
    let mut controller =
        InteractionController::new(Viewport::new(size.width as f32, size.height as f32));
    let mut tracker = PointerTracker::new();

    let mut scheduler = FrameScheduler::new(config.target_fps);
    scheduler.start();

    println!("[READY] drag to rotate, ESC to exit");

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    scheduler.stop();
                    println!(
                        "[SHUTDOWN] {} frames rendered, {} skipped",
                        renderer.stats().frames_rendered,
                        renderer.stats().frames_skipped,
                    );
                    elwt.exit();
                }

                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state,
                            ..
                        },
                    ..
                } => {
                    if key == KeyCode::Escape && state == ElementState::Pressed {
                        scheduler.stop();
                        println!(
                            "[SHUTDOWN] {} frames rendered, {} skipped",
                            renderer.stats().frames_rendered,
                            renderer.stats().frames_skipped,
                        );
                        elwt.exit();
                    }
                }

                WindowEvent::MouseInput {
                    button: MouseButton::Left,
                    state,
                    ..
                } => {
                    if let Some(message) =
                        tracker.left_button_changed(state == ElementState::Pressed)
                    {
                        controller.handle(message);
                    }
                }

                WindowEvent::CursorMoved { position, .. } => {
                    #[allow(clippy::cast_possible_truncation)]
                    let message = tracker.cursor_moved(position.x as f32, position.y as f32);
                    controller.handle(message);
                }

                WindowEvent::Resized(new_size) => {
                    if new_size.width > 0 && new_size.height > 0 {
                        renderer
                            .backend_mut()
                            .resize(new_size.width, new_size.height);
                        #[allow(clippy::cast_precision_loss)]
                        controller.set_viewport(Viewport::new(
                            new_size.width as f32,
                            new_size.height as f32,
                        ));
                    }
                }

                WindowEvent::RedrawRequested => {
                    renderer.tick(
                        controller.rotation(),
                        controller.cursor(),
                        controller.viewport().aspect(),
                    );
                }

                _ => {}
            },

            Event::AboutToWait => {
                if scheduler.tick_due(Instant::now()) {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    })?;

    Ok(())
}
