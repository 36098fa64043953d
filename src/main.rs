mod app;
mod canvas;
mod cli;
mod panel;
mod scheduler;
mod timer;

use std::time::Instant;

use anyhow::anyhow;
use app::App;
use canvas::{CANVAS_HEIGHT, CANVAS_WIDTH};
use clap::Parser;
use log::{error, info};
use panel::Action;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

fn create_window(args: &cli::Args) -> anyhow::Result<(EventLoop<()>, Window, Pixels)> {
    let event_loop = EventLoop::new();

    let size = LogicalSize::new(
        (CANVAS_WIDTH as u32 * args.scale) as f64,
        (CANVAS_HEIGHT as u32 * args.scale) as f64,
    );
    let window = WindowBuilder::new()
        .with_title(panel::TITLE)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|e| anyhow!("Failed to create window: {}", e))?;

    let size = window.inner_size();
    let surface = SurfaceTexture::new(size.width, size.height, &window);
    let pixels = Pixels::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32, surface)
        .map_err(|e| anyhow!("Failed to create the pixel frame buffer: {}", e))?;

    Ok((event_loop, window, pixels))
}

/// Map a keyboard shortcut to the action it triggers.
fn key_action(app: &App, key: VirtualKeyCode) -> Option<Action> {
    match key {
        VirtualKeyCode::Key1 => app.duration_action(0),
        VirtualKeyCode::Key2 => app.duration_action(1),
        VirtualKeyCode::Key3 => app.duration_action(2),
        VirtualKeyCode::Key4 => app.duration_action(3),
        VirtualKeyCode::Return => Some(Action::Start),
        VirtualKeyCode::Space => Some(Action::Stop),
        VirtualKeyCode::Back | VirtualKeyCode::Delete => Some(Action::Clear),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    // Start logger
    env_logger::init();

    // Read command line arguments
    let args = cli::Args::parse();
    info!("Duration buttons: {:?} min", args.increments);

    // Create window
    let (event_loop, window, mut pixels) = create_window(&args)?;

    let mut app = App::new(&args);

    // Start the main loop
    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                if app.countdown().remaining_seconds() > 0 {
                    info!("Closing with {} left", app.countdown().display());
                } else {
                    info!("Closing");
                }
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pixel = pixels
                    .window_pos_to_pixel((position.x as f32, position.y as f32))
                    .ok();
                app.cursor_moved(pixel);
            }
            WindowEvent::CursorLeft { .. } => app.cursor_moved(None),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => app.click(),
            WindowEvent::KeyboardInput { input, .. } => {
                if input.state != ElementState::Pressed {
                    return;
                }

                match input.virtual_keycode {
                    Some(VirtualKeyCode::Escape) => *control_flow = ControlFlow::Exit,
                    Some(key) => {
                        if let Some(action) = key_action(&app, key) {
                            app.dispatch(action);
                        }
                    }
                    None => (),
                }
            }
            WindowEvent::Resized(physical_size) => {
                pixels.resize_surface(physical_size.width, physical_size.height);
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                pixels.resize_surface(new_inner_size.width, new_inner_size.height);
                window.request_redraw();
            }
            _ => (),
        },
        Event::RedrawRequested(window_id) if window_id == window.id() => {
            app.draw(pixels.get_frame_mut());

            if let Err(e) = pixels.render() {
                error!("Render failed: {}", e);
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::MainEventsCleared => {
            if let ControlFlow::ExitWithCode(_) = *control_flow {
                return;
            }

            app.fire_expired(Instant::now());

            // Redraw the window if the panel has changed
            if app.should_draw() {
                window.request_redraw();
            }

            // Sleep until the next tick is due
            *control_flow = match app.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            };
        }
        _ => (),
    });
}
