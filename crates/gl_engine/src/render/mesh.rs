//! Mesh representation and GPU vertex buffers
//!
//! Contains the interleaved vertex definition shared with the GLSL attribute
//! layout, a unit-cube primitive builder, and the VAO/VBO wrapper that uploads
//! mesh data and issues draw calls.

use glow::HasContext;
use thiserror::Error;

/// Mesh upload errors
#[derive(Error, Debug)]
pub enum MeshError {
    /// The driver refused to allocate a buffer or vertex array
    #[error("GL buffer allocation failed: {0}")]
    Allocation(String),
}

/// 3D vertex data structure for rendering
///
/// Interleaved position, texture coordinate, and normal data. The field order
/// defines the attribute layout consumed by the vertex shader: location 0 is
/// position, location 1 is texture coordinates, location 2 is normal.
///
/// # Memory Layout
/// `#[repr(C)]` guarantees the interleaved layout matches what
/// [`GpuMesh::upload`] describes to GL, and [`bytemuck`] casts the vertex
/// slice straight into the buffer upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Texture coordinates
    pub tex_coords: [f32; 2],
    /// Surface normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a vertex from its components
    pub const fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            normal,
        }
    }
}

/// CPU-side mesh data
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex list, drawn as non-indexed triangles
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// Build a unit cube centered on the origin
    ///
    /// 36 vertices (two triangles per face) with per-face normals and full
    /// 0..1 texture coordinates on every face.
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            // Back face
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 0.0], [0.0, 0.0, -1.0]),
            Vertex::new([ 0.5, -0.5, -0.5], [1.0, 0.0], [0.0, 0.0, -1.0]),
            Vertex::new([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 0.0, -1.0]),
            Vertex::new([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 0.0, -1.0]),
            Vertex::new([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 0.0, -1.0]),
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 0.0], [0.0, 0.0, -1.0]),
            // Front face
            Vertex::new([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, 0.0, 1.0]),
            Vertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, 0.0, 1.0]),
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 1.0], [0.0, 0.0, 1.0]),
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 1.0], [0.0, 0.0, 1.0]),
            Vertex::new([-0.5,  0.5,  0.5], [0.0, 1.0], [0.0, 0.0, 1.0]),
            Vertex::new([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, 0.0, 1.0]),
            // Left face
            Vertex::new([-0.5,  0.5,  0.5], [1.0, 0.0], [-1.0, 0.0, 0.0]),
            Vertex::new([-0.5,  0.5, -0.5], [1.0, 1.0], [-1.0, 0.0, 0.0]),
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 1.0], [-1.0, 0.0, 0.0]),
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 1.0], [-1.0, 0.0, 0.0]),
            Vertex::new([-0.5, -0.5,  0.5], [0.0, 0.0], [-1.0, 0.0, 0.0]),
            Vertex::new([-0.5,  0.5,  0.5], [1.0, 0.0], [-1.0, 0.0, 0.0]),
            // Right face
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0], [1.0, 0.0, 0.0]),
            Vertex::new([ 0.5,  0.5, -0.5], [1.0, 1.0], [1.0, 0.0, 0.0]),
            Vertex::new([ 0.5, -0.5, -0.5], [0.0, 1.0], [1.0, 0.0, 0.0]),
            Vertex::new([ 0.5, -0.5, -0.5], [0.0, 1.0], [1.0, 0.0, 0.0]),
            Vertex::new([ 0.5, -0.5,  0.5], [0.0, 0.0], [1.0, 0.0, 0.0]),
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0], [1.0, 0.0, 0.0]),
            // Bottom face
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 1.0], [0.0, -1.0, 0.0]),
            Vertex::new([ 0.5, -0.5, -0.5], [1.0, 1.0], [0.0, -1.0, 0.0]),
            Vertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, -1.0, 0.0]),
            Vertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0], [0.0, -1.0, 0.0]),
            Vertex::new([-0.5, -0.5,  0.5], [0.0, 0.0], [0.0, -1.0, 0.0]),
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 1.0], [0.0, -1.0, 0.0]),
            // Top face
            Vertex::new([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 1.0, 0.0]),
            Vertex::new([ 0.5,  0.5, -0.5], [1.0, 1.0], [0.0, 1.0, 0.0]),
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([ 0.5,  0.5,  0.5], [1.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([-0.5,  0.5,  0.5], [0.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([-0.5,  0.5, -0.5], [0.0, 1.0], [0.0, 1.0, 0.0]),
        ];
        Self { vertices }
    }
}

/// GPU-resident mesh: a vertex array object with its backing buffer
///
/// The VAO and VBO are not freed on drop; they live until the owning GL
/// context is destroyed, which reclaims all objects created from it.
pub struct GpuMesh {
    vao: glow::NativeVertexArray,
    _vbo: glow::NativeBuffer,
    vertex_count: i32,
}

impl GpuMesh {
    /// Upload mesh data into a fresh VAO/VBO pair
    ///
    /// Configures the three vertex attributes (position, texture coordinates,
    /// normal) at locations 0/1/2 over the interleaved [`Vertex`] layout.
    ///
    /// # Errors
    /// Returns [`MeshError::Allocation`] if the driver refuses to allocate
    /// the vertex array or buffer object.
    pub fn upload(gl: &glow::Context, mesh: &Mesh) -> Result<Self, MeshError> {
        let stride = std::mem::size_of::<Vertex>() as i32;

        unsafe {
            let vao = gl.create_vertex_array().map_err(MeshError::Allocation)?;
            let vbo = gl.create_buffer().map_err(MeshError::Allocation)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.vertices),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 12);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 20);
            gl.enable_vertex_attrib_array(2);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            log::debug!("Uploaded mesh with {} vertices", mesh.vertices.len());

            Ok(Self {
                vao,
                _vbo: vbo,
                vertex_count: mesh.vertices.len() as i32,
            })
        }
    }

    /// Draw the mesh as non-indexed triangles
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
            gl.bind_vertex_array(None);
        }
    }
}
