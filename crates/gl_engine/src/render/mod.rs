//! # Rendering System
//!
//! This module provides the OpenGL rendering layer for the engine.
//!
//! ## Architecture
//!
//! The rendering system is a set of thin, direct wrappers over OpenGL 3.3:
//! - **`GlWindow`**: GLFW window owning the GL context and event stream
//! - **`ShaderProgram`**: compile/link wrapper with by-name uniform upload
//! - **`LightingSystem`**: Phong shader plus a fixed-capacity light registry
//!   whose uniform state is re-uploaded on every mutation
//! - **`FlyCamera`**: first-person camera supplying the view matrix and eye
//!   position
//! - **`GpuMesh` / `Texture2D`**: vertex buffer and texture helpers
//!
//! ## Design Goals
//!
//! - **Immediate-mode**: every operation runs synchronously on the thread
//!   owning the GL context; there is no deferred or dirty state
//! - **Mutation-driven uploads**: light uniforms are written when the registry
//!   changes, not per frame, so static lights carry zero per-frame cost
//! - **Testable**: uniform upload goes through the [`UniformSink`] seam so the
//!   registry contract is verifiable without a GL context

pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod shader;
pub mod texture;
pub mod window;

pub use camera::{CameraMovement, FlyCamera};
pub use lighting::{LightRegistry, LightSource, LightingSystem, MAX_LIGHT_SOURCES};
pub use mesh::{GpuMesh, Mesh, MeshError, Vertex};
pub use shader::{BoundProgram, ShaderError, ShaderProgram, ShaderResult, UniformSink};
pub use texture::{Texture2D, TextureError, TextureResult};
pub use window::{GlWindow, WindowError, WindowResult};
