pub mod buffer;
pub mod layout;
pub mod vertex_array;
pub mod shader;
pub mod texture;

use crate::backend::Gl;

use anyhow::Context as _;

pub type ResourcePath = std::path::PathBuf;
pub type ResourcePathRef = std::path::Path;

pub use self::buffer::{VertexBuffer, IndexBuffer};
pub use self::layout::{VertexBufferLayout, VertexAttribute, VertexElement};
pub use self::vertex_array::VertexArray;
pub use self::shader::{Shader, ShaderError, ShaderProgramSource, parse_shader};
pub use self::texture::{Texture, TextureParams, TextureWrap, TextureFilter};


/// Resolves asset paths against a root directory and loads them into GL objects.
#[derive(Debug)]
pub struct ResourceManager {
	gl: Gl,
	resource_root_path: ResourcePath,
}

impl ResourceManager {
	pub fn new(gl: &Gl, resource_root_path: impl Into<ResourcePath>) -> anyhow::Result<Self> {
		let resource_root_path = resource_root_path.into();

		anyhow::ensure!(resource_root_path.exists(), "Couldn't find resource path '{}'", resource_root_path.display());

		Ok(Self{
			gl: gl.clone(),
			resource_root_path,
		})
	}

	pub fn resolve_path(&self, path: &ResourcePathRef) -> ResourcePath {
		self.resource_root_path.join(path)
	}

	pub fn load_shader(&self, path: &ResourcePathRef) -> anyhow::Result<Shader> {
		let shader = Shader::open(&self.gl, &self.resolve_path(path))
			.with_context(|| format!("Failed to build shader '{}'", path.display()))?;

		Ok(shader)
	}

	pub fn load_texture(&self, path: &ResourcePathRef) -> anyhow::Result<Texture> {
		Texture::open(&self.gl, &self.resolve_path(path))
	}
}
