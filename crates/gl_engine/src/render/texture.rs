//! 2D texture loading and GPU upload
//!
//! Decodes image files through the [`image`] crate (images are flipped
//! vertically so row 0 lands at texture coordinate 0, matching GL's origin)
//! and uploads them with repeat wrapping, linear filtering, and mipmaps.

use glow::HasContext;
use std::path::Path;
use thiserror::Error;

/// Texture loading and upload errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// The image file could not be read or decoded
    #[error("failed to load image {path}: {source}")]
    Image {
        /// Path that failed to load
        path: String,
        /// Underlying decode error
        source: image::ImageError,
    },

    /// The driver refused to allocate a texture object
    #[error("GL texture allocation failed: {0}")]
    Allocation(String),
}

/// Result alias for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// GPU-resident 2D texture
///
/// The texture object is not freed on drop; it lives until the owning GL
/// context is destroyed, which reclaims all objects created from it.
pub struct Texture2D {
    texture: glow::NativeTexture,
}

impl Texture2D {
    /// Load a texture from an image file
    ///
    /// # Errors
    /// Returns [`TextureError::Image`] if the file cannot be read or decoded,
    /// or [`TextureError::Allocation`] if the GL object cannot be created.
    pub fn from_file<P: AsRef<Path>>(gl: &glow::Context, path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| TextureError::Image {
                path: path.display().to_string(),
                source,
            })?
            .flipv()
            .to_rgba8();

        let (width, height) = image.dimensions();
        log::debug!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::from_rgba(gl, width, height, image.as_raw())
    }

    /// Upload raw RGBA8 pixels as a texture
    ///
    /// Pixels are tightly packed, row-major, `width * height * 4` bytes.
    ///
    /// # Errors
    /// Returns [`TextureError::Allocation`] if the GL object cannot be
    /// created.
    pub fn from_rgba(
        gl: &glow::Context,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> TextureResult<Self> {
        unsafe {
            let texture = gl.create_texture().map_err(TextureError::Allocation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self { texture })
        }
    }

    /// Bind the texture to a texture unit
    ///
    /// # Arguments
    /// * `unit` - Zero-based texture unit index (0 maps to `GL_TEXTURE0`)
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }
}
