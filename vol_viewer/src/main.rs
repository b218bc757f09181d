//! Interactive volume viewer
//!
//! Ray-marches a loaded volume on the GPU. Optionally takes a `.vol`
//! path as the first argument, for example:
//! `cargo run --release --bin vol_viewer volumes/skull.vol`
//!
//! Controls: left drag orbits, right drag zooms, arrows/WASD step,
//! `1`/`2`/`3` select a color channel and `,`/`.` + `[`/`]` move its
//! min/max thresholds, `J`/`L` `K`/`I` `M`/`U` move the light,
//! `R` hot-reloads the shader, `O` opens the volume picker.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

mod defaults;
mod gpu;
mod input;
mod session;

use gpu::GpuContext;
use input::InputController;
use session::Session;

pub fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(defaults::WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                defaults::WINDOW_WIDTH,
                defaults::WINDOW_HEIGHT,
            ))
            .build(&event_loop)
            .context("create window")?,
    );

    let mut gpu = GpuContext::new(window.clone())?;

    // shader build failure at startup is fatal
    let mut session = Session::new(&gpu, window.clone())?;

    // volume load failure is not: start with an empty scene
    if let Some(arg) = std::env::args().nth(1) {
        if let Err(msg) = session.load_volume(&gpu, Path::new(&arg)) {
            log::error!("cannot load volume {arg}: {msg}");
        }
    }

    let mut input = InputController::new();

    event_loop
        .run(move |event, elwt| {
            let event = match event {
                Event::WindowEvent { event, .. } => event,
                _ => return,
            };

            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    session.resize(&mut gpu, size.width, size.height);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.handle_cursor_moved(&mut session, position.x as f32, position.y as f32);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.handle_mouse_button(&mut session, button, state);
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    if let Err(e) = input.handle_key_press(&mut session, &gpu, code) {
                        // running with an inconsistent shader is not an option
                        log::error!("{e:#}");
                        std::process::exit(1);
                    }
                }
                WindowEvent::RedrawRequested => match session.render(&gpu) {
                    Ok(()) => (),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.reconfigure();
                        session.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        elwt.exit();
                    }
                    Err(e) => log::warn!("frame skipped: {e}"),
                },
                _ => (),
            }
        })
        .context("event loop")?;

    Ok(())
}
