use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use phone_viewer::camera::Camera;
use phone_viewer::intake::FileIntake;
use phone_viewer::renderer::Renderer;
use phone_viewer::scene::PhoneModel;
use phone_viewer::shell::AppState;

// === Constants ===

const ASSET_PATH: &str = "assets/phone.gltf";
const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;

// === Type Aliases ===

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Application ===

/// Wires the three pieces together: file intake feeds the texture payload
/// up into the shell state, the shell pushes `open`/`texture` down into
/// the scene model, and a click on the model toggles `open`.
struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    model: Option<PhoneModel>,
    state: AppState,
    intake: FileIntake,
    camera: Camera,
    start: Instant,
    last_frame: Instant,
    cursor: (f32, f32),
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            model: None,
            state: AppState::new(),
            intake: FileIntake::new(),
            camera: Camera::new(),
            start: Instant::now(),
            last_frame: Instant::now(),
            cursor: (0.0, 0.0),
        }
    }

    /// Click routing: the model is the only hit-target in the scene
    fn handle_click(&mut self) {
        let (Some(model), Some(renderer)) = (&self.model, &self.renderer) else {
            return;
        };

        let (origin, dir) = self.camera.picking_ray(self.cursor, renderer.size());
        if model.hit_test(origin, dir) {
            self.state.toggle_open();
            println!("phone {}", if self.state.open() { "open" } else { "closed" });
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Completed file reads arrive in completion order; the last one
        // observed this frame wins
        for event in self.intake.poll() {
            self.state.set_texture(event.data_url);
        }

        self.state.step(delta);

        let elapsed = self.start.elapsed().as_secs_f32();
        if let Some(model) = &mut self.model {
            model.set_texture(self.state.texture());
            model.update(elapsed, self.state.open());
        }

        if let (Some(renderer), Some(model), Some(window)) =
            (&mut self.renderer, &self.model, &self.window)
        {
            if let Err(e) = renderer.render(window, model, &mut self.state, &self.camera) {
                eprintln!("Render error: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Phone Viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            // The asset is an external collaborator; failing to load it is
            // unrecoverable
            let model = match PhoneModel::load(ASSET_PATH) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Failed to load phone asset: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(Renderer::new(window.clone(), &model)) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.model = Some(model);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::DroppedFile(path) => {
                println!("file dropped: {:?}", path);
                self.intake.submit(path);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();

    println!("Phone Viewer - drop an image on the window, click the phone to flip it");
    event_loop.run_app(&mut app)?;

    Ok(())
}
