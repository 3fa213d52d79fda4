//! # GL Engine
//!
//! A small step-by-step rendering engine written in Rust with OpenGL 3.3.
//!
//! ## Features
//!
//! - **OpenGL Rendering**: Classic fixed-layout pipeline via [glow]
//! - **Phong Lighting**: Fixed-capacity multi-light registry with
//!   mutation-driven uniform upload
//! - **Fly Camera**: First-person camera with mouse look and scroll zoom
//! - **Cross-Platform Windowing**: GLFW window and context management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_engine::render::{GlWindow, LightingSystem, LightSource};
//! use gl_engine::foundation::math::Vec3;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let window = GlWindow::new(1280, 720, "Demo")?;
//!     let mut lighting = LightingSystem::new(
//!         window.gl(),
//!         "resources/shaders/basic_lighting.vert",
//!         "resources/shaders/basic_lighting.frag",
//!     )?;
//!
//!     let sun = LightSource {
//!         is_directional: true,
//!         direction: Vec3::new(0.0, -1.0, 0.0),
//!         diffuse: Vec3::new(1.0, 1.0, 1.0),
//!         ..LightSource::default()
//!     };
//!     lighting.add_light(window.gl(), sun);
//!     Ok(())
//! }
//! ```
//!
//! [glow]: https://docs.rs/glow

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;

/// Commonly used types for applications
pub mod prelude {
    pub use crate::config::{Config, DisplaySettings};
    pub use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
    pub use crate::foundation::time::Timer;
    pub use crate::render::{
        FlyCamera, GlWindow, GpuMesh, LightSource, LightingSystem, Mesh, ShaderProgram,
        Texture2D, Vertex, MAX_LIGHT_SOURCES,
    };
}
