//! Textured cube demo application
//!
//! Renders a spinning container-style cube lit by a directional light and a
//! red point light, with a free-flying first-person camera. Demonstrates the
//! engine's lighting registry, shader wrapper, and windowing layer together.
//!
//! Controls:
//! - `WASD` to move, `Space`/`LShift` for up/down
//! - Mouse to look around, scroll wheel to zoom
//! - `F1` to release/capture the cursor
//! - `Escape` to quit

use gl_engine::config::{Config, DisplaySettings};
use gl_engine::foundation::math::{Mat4, Mat4Ext, Vec3};
use gl_engine::foundation::time::Timer;
use gl_engine::render::{
    CameraMovement, FlyCamera, GlWindow, GpuMesh, LightSource, LightingSystem, Mesh, Texture2D,
};
use glfw::{Action, Key, WindowEvent};
use glow::HasContext;

const SETTINGS_PATH: &str = "resources/config/display.toml";
const VERTEX_SHADER_PATH: &str = "resources/shaders/basic_lighting.vert";
const FRAGMENT_SHADER_PATH: &str = "resources/shaders/basic_lighting.frag";

pub struct CubeApp {
    window: GlWindow,
    lighting: LightingSystem,
    camera: FlyCamera,
    timer: Timer,
    cube: GpuMesh,
    diffuse_map: Texture2D,
    specular_map: Texture2D,
    cursor_captured: bool,
    last_cursor: Option<(f64, f64)>,
}

impl CubeApp {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let settings = DisplaySettings::load_from_file(SETTINGS_PATH).unwrap_or_else(|e| {
            log::warn!("Could not load {SETTINGS_PATH} ({e}), using defaults");
            DisplaySettings::default()
        });

        log::info!("Creating window...");
        let mut window = GlWindow::new(settings.width, settings.height, &settings.title)?;
        window.set_cursor_captured(true);

        unsafe {
            window.gl().enable(glow::DEPTH_TEST);
        }

        log::info!("Loading lighting shader...");
        let mut lighting =
            LightingSystem::new(window.gl(), VERTEX_SHADER_PATH, FRAGMENT_SHADER_PATH)?;

        // Overcast directional light plus a red accent point light
        let sun = LightSource {
            is_directional: true,
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(1.0, 1.0, 1.0),
            ..LightSource::default()
        };
        let accent = LightSource {
            position: Vec3::new(-1.0, 1.0, 1.0),
            ambient: Vec3::new(0.05, 0.0, 0.0),
            diffuse: Vec3::new(0.8, 0.1, 0.1),
            specular: Vec3::new(1.0, 0.3, 0.3),
            ..LightSource::default()
        };
        lighting.add_light(window.gl(), sun);
        lighting.add_light(window.gl(), accent);

        let (fb_width, fb_height) = window.get_framebuffer_size();
        let mut camera = FlyCamera::new(
            Vec3::new(0.0, 0.0, 3.0),
            fb_width as f32 / fb_height as f32,
        );
        camera.sensitivity = settings.mouse_sensitivity;
        camera.speed = settings.move_speed;
        camera.set_fov_degrees(settings.fov_degrees);

        let cube = GpuMesh::upload(window.gl(), &Mesh::cube())?;

        // Procedural checkerboards stand in for the usual container textures:
        // a colorful diffuse map and a mostly-dark specular map whose bright
        // cells produce visible highlights along the checker pattern.
        let diffuse_map = Texture2D::from_rgba(
            window.gl(),
            64,
            64,
            &checkerboard(64, 8, [180, 110, 60, 255], [90, 55, 30, 255]),
        )?;
        let specular_map = Texture2D::from_rgba(
            window.gl(),
            64,
            64,
            &checkerboard(64, 8, [200, 200, 200, 255], [20, 20, 20, 255]),
        )?;

        Ok(Self {
            window,
            lighting,
            camera,
            timer: Timer::new(),
            cube,
            diffuse_map,
            specular_map,
            cursor_captured: true,
            last_cursor: None,
        })
    }

    pub fn run(&mut self) {
        log::info!("Starting render loop");

        while !self.window.should_close() {
            self.timer.update();
            let delta_time = self.timer.delta_time();

            self.window.poll_events();
            for (_, event) in self.window.flush_events() {
                self.handle_event(&event);
            }
            self.process_held_keys(delta_time);

            self.render();
            self.window.swap_buffers();
        }

        log::info!(
            "Render loop finished after {} frames ({:.1}s)",
            self.timer.frame_count(),
            self.timer.total_time()
        );
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                self.window.set_should_close(true);
            }
            WindowEvent::Key(Key::F1, _, Action::Press, _) => {
                self.cursor_captured = !self.cursor_captured;
                self.window.set_cursor_captured(self.cursor_captured);
                // Drop the stale cursor anchor so recapture does not jerk
                self.last_cursor = None;
            }
            WindowEvent::FramebufferSize(width, height) => {
                if width > 0 && height > 0 {
                    self.window.set_viewport(width as u32, height as u32);
                    self.camera.set_aspect_ratio(width as f32 / height as f32);
                }
            }
            WindowEvent::CursorPos(x, y) => {
                if self.cursor_captured {
                    if let Some((last_x, last_y)) = self.last_cursor {
                        // Screen y grows downward; invert it for pitch
                        let x_offset = (x - last_x) as f32;
                        let y_offset = (last_y - y) as f32;
                        self.camera.process_mouse(x_offset, y_offset);
                    }
                    self.last_cursor = Some((x, y));
                }
            }
            WindowEvent::Scroll(_, y_offset) => {
                self.camera.process_scroll(y_offset as f32);
            }
            _ => {}
        }
    }

    fn process_held_keys(&mut self, delta_time: f32) {
        let bindings = [
            (Key::W, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
            (Key::Space, CameraMovement::Up),
            (Key::LeftShift, CameraMovement::Down),
        ];
        for (key, direction) in bindings {
            if self.window.key_pressed(key) {
                self.camera.process_keyboard(direction, delta_time);
            }
        }
    }

    fn render(&mut self) {
        let gl = self.window.gl();
        unsafe {
            gl.clear_color(0.3, 0.3, 0.3, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let projection = self.camera.projection_matrix();
        self.lighting.begin_frame(gl, &self.camera, &projection);

        self.diffuse_map.bind(gl, 0);
        self.specular_map.bind(gl, 1);

        // Slow spin so both textures and all lit faces come into view
        let model = Mat4::rotation_y(self.timer.total_time() * 0.5);
        self.lighting.set_model_matrix(gl, &model);
        self.cube.draw(gl);
    }
}

/// Generate a square RGBA8 checkerboard texture
///
/// `size` is the edge length in pixels and `cells` the number of checker
/// cells per edge; `size` should be a multiple of `cells`.
fn checkerboard(size: u32, cells: u32, primary: [u8; 4], secondary: [u8; 4]) -> Vec<u8> {
    let cell_size = (size / cells).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let checker = ((x / cell_size) + (y / cell_size)) % 2 == 0;
            let color = if checker { primary } else { secondary };
            pixels.extend_from_slice(&color);
        }
    }
    pixels
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    gl_engine::foundation::logging::init();

    let mut app = CubeApp::new()?;
    app.run();
    Ok(())
}
