use crate::backend::Gl;
use crate::config::AppConfig;
use crate::debug::gl_call;
use crate::renderer::Renderer;
use crate::resource_manager::*;


/// Everything tied to one GL context. Must be dropped while that context is current.
#[derive(Debug)]
pub struct Context {
	pub gl: Gl,
	pub resource_manager: ResourceManager,
	pub renderer: Renderer,
}

impl Context {
	pub fn new(gl: Gl, config: &AppConfig) -> anyhow::Result<Self> {
		log::info!("OpenGL {}", gl.version_string());

		let resource_manager = ResourceManager::new(&gl, &config.resource_root)?;
		let renderer = Renderer::new(&gl);

		renderer.set_clear_color(config.clear_color);
		gl_call!(gl, enable_alpha_blending());

		Ok(Self{
			gl,
			resource_manager,
			renderer,
		})
	}

	pub fn resize(&self, width: u32, height: u32) {
		gl_call!(self.gl, viewport(0, 0, width as i32, height as i32));
	}

	pub fn vertex_buffer<T: bytemuck::Pod>(&self, data: &[T]) -> anyhow::Result<VertexBuffer> {
		VertexBuffer::new(&self.gl, data)
	}

	pub fn index_buffer(&self, indices: &[u32]) -> anyhow::Result<IndexBuffer> {
		IndexBuffer::new(&self.gl, indices)
	}

	pub fn vertex_array(&self) -> anyhow::Result<VertexArray> {
		VertexArray::new(&self.gl)
	}
}
