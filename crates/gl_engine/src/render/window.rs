//! Window management using GLFW
//!
//! Provides cross-platform window creation, event handling, and OpenGL
//! context ownership. All GL calls made anywhere in the engine go through the
//! [`glow::Context`] created here, on the thread that owns the window.

use glfw::Context as _;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW library failed to initialize
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Window or context creation failed
    #[error("Window creation failed")]
    CreationFailed,
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper owning the OpenGL context
///
/// Creates an OpenGL 3.3 core profile context, makes it current on the
/// calling thread, and loads the [`glow`] function pointers from it. The
/// window also owns the GLFW event receiver; applications drain it once per
/// frame via [`GlWindow::flush_events`].
pub struct GlWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    gl: glow::Context,
}

impl GlWindow {
    /// Create a new window with an OpenGL 3.3 core context
    ///
    /// # Arguments
    /// * `width` - Window width in pixels
    /// * `height` - Window height in pixels
    /// * `title` - Window title string
    ///
    /// # Errors
    /// Returns [`WindowError`] if GLFW fails to initialize or the window or
    /// context cannot be created.
    pub fn new(width: u32, height: u32, title: &str) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(e.to_string()))?;

        // OpenGL 3.3 core profile
        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        // Set up event polling
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_framebuffer_size_polling(true);

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                window.get_proc_address(symbol) as *const _
            })
        };

        log::info!(
            "Created {}x{} window with OpenGL 3.3 core context",
            width,
            height
        );

        Ok(Self {
            glfw,
            window,
            events,
            gl,
        })
    }

    /// Access the OpenGL context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Whether the user has requested the window to close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request or cancel window close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Pump the GLFW event queue (call once per frame)
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain all pending window events
    pub fn flush_events(&self) -> Vec<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events).collect()
    }

    /// Whether a key is currently held down
    pub fn key_pressed(&self, key: glfw::Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    /// Get the framebuffer size in pixels
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width as u32, height as u32)
    }

    /// Capture or release the mouse cursor
    ///
    /// Captured mode hides the cursor and locks it to the window, which is
    /// what first-person mouse look expects.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        let mode = if captured {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        };
        self.window.set_cursor_mode(mode);
    }

    /// Update the GL viewport, typically after a framebuffer resize
    pub fn set_viewport(&self, width: u32, height: u32) {
        use glow::HasContext;
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error_carries_glfw_message() {
        let error = WindowError::InitializationFailed("platform unavailable".to_string());
        assert_eq!(
            error.to_string(),
            "GLFW initialization failed: platform unavailable"
        );
    }
}
