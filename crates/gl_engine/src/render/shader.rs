//! Shader program compilation and uniform upload
//!
//! Wraps the GL shader pipeline the way the tutorial steps use it: read two
//! GLSL source files, compile a vertex/fragment pair, link, and upload
//! uniforms by name. Uniform locations are resolved on every call rather than
//! cached; an unresolved name is a silent no-op, mirroring GL's own handling
//! of location `-1`.
//!
//! Upload logic that should be testable without a live context (the lighting
//! registry) goes through the [`UniformSink`] trait instead of calling
//! [`ShaderProgram`] directly; [`BoundProgram`] is the production
//! implementation and tests substitute a recording mock.

use crate::foundation::math::{Mat4, Vec3};
use glow::HasContext;
use std::path::Path;
use thiserror::Error;

/// Shader compilation and linking errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// A shader source file could not be read
    #[error("failed to read shader source {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A shader stage failed to compile
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile {
        /// Stage name ("vertex" or "fragment")
        stage: &'static str,
        /// Compiler diagnostic text
        log: String,
    },

    /// The program failed to link
    #[error("shader program linking failed:\n{log}")]
    Link {
        /// Linker diagnostic text
        log: String,
    },

    /// The driver refused to allocate a shader or program object
    #[error("GL object allocation failed: {0}")]
    Allocation(String),
}

/// Result alias for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Uniform upload surface
///
/// Abstracts the typed by-name setters of a bound shader program so that
/// code uploading uniform state (the light registry in particular) can be
/// exercised against a mock in unit tests.
pub trait UniformSink {
    /// Upload a boolean uniform (as an integer, per GLSL convention)
    fn set_bool(&mut self, name: &str, value: bool);
    /// Upload an integer uniform
    fn set_i32(&mut self, name: &str, value: i32);
    /// Upload a float uniform
    fn set_f32(&mut self, name: &str, value: f32);
    /// Upload a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: Vec3);
    /// Upload a mat4 uniform (column-major)
    fn set_mat4(&mut self, name: &str, value: &Mat4);
}

/// Linked GL shader program handle with typed uniform setters
///
/// The program object is not freed on drop; it lives until the owning GL
/// context is destroyed, which reclaims all objects created from it.
pub struct ShaderProgram {
    program: glow::NativeProgram,
}

impl ShaderProgram {
    /// Build a program from two GLSL source files
    ///
    /// Reads both files wholesale (no preprocessing or include resolution)
    /// and forwards to [`ShaderProgram::from_sources`].
    ///
    /// # Errors
    /// Returns [`ShaderError::Io`] when either file cannot be read, or any
    /// compile/link error from `from_sources`.
    pub fn from_files<P: AsRef<Path>>(
        gl: &glow::Context,
        vertex_path: P,
        fragment_path: P,
    ) -> ShaderResult<Self> {
        let vertex_source = read_source(vertex_path.as_ref())?;
        let fragment_source = read_source(fragment_path.as_ref())?;
        Self::from_sources(gl, &vertex_source, &fragment_source)
    }

    /// Compile a vertex/fragment source pair and link them into a program
    ///
    /// # Errors
    /// Returns [`ShaderError::Compile`] with the driver's diagnostic text if
    /// either stage reports a non-success compile status, or
    /// [`ShaderError::Link`] if linking fails.
    pub fn from_sources(
        gl: &glow::Context,
        vertex_source: &str,
        fragment_source: &str,
    ) -> ShaderResult<Self> {
        let vertex = compile_stage(gl, glow::VERTEX_SHADER, "vertex", vertex_source)?;
        let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, "fragment", fragment_source)
        {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        let program = unsafe {
            let program = gl.create_program().map_err(ShaderError::Allocation)?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // Shader objects are no longer needed once linked
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }
            program
        };

        log::debug!("Linked shader program {program:?}");
        Ok(Self { program })
    }

    /// Make this program active for subsequent uniform uploads and draws
    pub fn activate(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    /// Bind this program and return a [`UniformSink`] over it
    pub fn bind<'a>(&'a self, gl: &'a glow::Context) -> BoundProgram<'a> {
        self.activate(gl);
        BoundProgram { gl, program: self }
    }

    /// Upload a boolean uniform; no-op if `name` does not resolve
    pub fn set_bool(&self, gl: &glow::Context, name: &str, value: bool) {
        self.set_i32(gl, name, i32::from(value));
    }

    /// Upload an integer uniform; no-op if `name` does not resolve
    pub fn set_i32(&self, gl: &glow::Context, name: &str, value: i32) {
        unsafe {
            let location = gl.get_uniform_location(self.program, name);
            gl.uniform_1_i32(location.as_ref(), value);
        }
    }

    /// Upload a float uniform; no-op if `name` does not resolve
    pub fn set_f32(&self, gl: &glow::Context, name: &str, value: f32) {
        unsafe {
            let location = gl.get_uniform_location(self.program, name);
            gl.uniform_1_f32(location.as_ref(), value);
        }
    }

    /// Upload a vec3 uniform; no-op if `name` does not resolve
    pub fn set_vec3(&self, gl: &glow::Context, name: &str, value: Vec3) {
        unsafe {
            let location = gl.get_uniform_location(self.program, name);
            gl.uniform_3_f32(location.as_ref(), value.x, value.y, value.z);
        }
    }

    /// Upload a column-major mat4 uniform; no-op if `name` does not resolve
    pub fn set_mat4(&self, gl: &glow::Context, name: &str, value: &Mat4) {
        unsafe {
            let location = gl.get_uniform_location(self.program, name);
            gl.uniform_matrix_4_f32_slice(location.as_ref(), false, value.as_slice());
        }
    }
}

/// A [`ShaderProgram`] bound to a GL context, usable as a [`UniformSink`]
pub struct BoundProgram<'a> {
    gl: &'a glow::Context,
    program: &'a ShaderProgram,
}

impl UniformSink for BoundProgram<'_> {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.program.set_bool(self.gl, name, value);
    }

    fn set_i32(&mut self, name: &str, value: i32) {
        self.program.set_i32(self.gl, name, value);
    }

    fn set_f32(&mut self, name: &str, value: f32) {
        self.program.set_f32(self.gl, name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.program.set_vec3(self.gl, name, value);
    }

    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.program.set_mat4(self.gl, name, value);
    }
}

fn read_source(path: &Path) -> ShaderResult<String> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn compile_stage(
    gl: &glow::Context,
    kind: u32,
    stage: &'static str,
    source: &str,
) -> ShaderResult<glow::NativeShader> {
    unsafe {
        let shader = gl.create_shader(kind).map_err(ShaderError::Allocation)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}
