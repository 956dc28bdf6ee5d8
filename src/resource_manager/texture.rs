use crate::backend::Gl;
use crate::debug::gl_call;

use anyhow::Context as _;
use std::path::Path;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum TextureWrap {
	ClampToEdge = gl::CLAMP_TO_EDGE,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum TextureFilter {
	Linear = gl::LINEAR,
}

/// Sampling state stored on the texture object at upload. Both axes share one wrap mode.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct TextureParams {
	pub wrap: TextureWrap,
	pub min_filter: TextureFilter,
	pub mag_filter: TextureFilter,
}

impl TextureParams {
	pub const LINEAR_CLAMPED: TextureParams = TextureParams {
		wrap: TextureWrap::ClampToEdge,
		min_filter: TextureFilter::Linear,
		mag_filter: TextureFilter::Linear,
	};
}

impl Default for TextureParams {
	fn default() -> Self {
		TextureParams::LINEAR_CLAMPED
	}
}


/// A 2D RGBA8 texture.
#[derive(Debug)]
pub struct Texture {
	gl: Gl,
	name: u32,
	width: u32,
	height: u32,
	label: String,
}

impl Texture {
	/// Decodes `path` and uploads it with the first row at the bottom, matching GL's texture origin.
	pub fn open(gl: &Gl, path: &Path) -> anyhow::Result<Texture> {
		let image = image::open(path)
			.with_context(|| format!("Failed to decode image '{}'", path.display()))?
			.flipv()
			.into_rgba8();

		// The decoded pixels are dropped once they've been handed to the driver
		Texture::from_image(gl, &image, TextureParams::default(), &path.display().to_string())
	}

	pub fn from_image(gl: &Gl, image: &image::RgbaImage, params: TextureParams, label: &str) -> anyhow::Result<Texture> {
		let gl = gl.clone();
		let (width, height) = image.dimensions();

		let name = gl_call!(gl, create_texture());
		anyhow::ensure!(name != 0, "Failed to allocate texture for '{label}'");

		gl_call!(gl, bind_texture(name));
		gl_call!(gl, texture_parameters(&params));
		gl_call!(gl, tex_image_2d(width, height, image.as_raw()));
		gl_call!(gl, bind_texture(0));

		log::debug!("created texture {name} from '{label}' ({width}x{height})");

		Ok(Texture {
			gl,
			name,
			width,
			height,
			label: label.to_owned(),
		})
	}

	#[cfg(test)]
	pub fn name(&self) -> u32 {
		self.name
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Makes `unit` the active texture unit and selects this texture on it.
	pub fn bind(&self, unit: u32) {
		gl_call!(self.gl, active_texture(unit));
		gl_call!(self.gl, bind_texture(self.name));
	}

	/// Clears the texture selection on the active unit.
	pub fn unbind(&self) {
		gl_call!(self.gl, bind_texture(0));
	}
}

impl Drop for Texture {
	fn drop(&mut self) {
		log::trace!("deleting texture {} '{}'", self.name, self.label);
		gl_call!(self.gl, delete_texture(self.name));
	}
}
