use crate::backend::{BufferTarget, BufferUsage, ElementKind, Gl};
use crate::debug::gl_call;

use bytemuck::Pod;


/// Interleaved vertex data, uploaded once at creation.
#[derive(Debug)]
pub struct VertexBuffer {
	gl: Gl,
	name: u32,
	size: usize,
}

impl VertexBuffer {
	pub fn new<T: Pod>(gl: &Gl, data: &[T]) -> anyhow::Result<VertexBuffer> {
		let gl = gl.clone();
		let bytes: &[u8] = bytemuck::cast_slice(data);

		let name = gl_call!(gl, create_buffer());
		anyhow::ensure!(name != 0, "Failed to allocate vertex buffer ({} bytes)", bytes.len());

		gl_call!(gl, bind_buffer(BufferTarget::Vertex, name));
		gl_call!(gl, buffer_data(BufferTarget::Vertex, bytes, BufferUsage::StaticDraw));

		log::trace!("created vertex buffer {name} ({} bytes)", bytes.len());

		Ok(VertexBuffer { gl, name, size: bytes.len() })
	}

	#[cfg(test)]
	pub fn name(&self) -> u32 {
		self.name
	}

	#[cfg(test)]
	pub fn size(&self) -> usize {
		self.size
	}

	pub fn bind(&self) {
		gl_call!(self.gl, bind_buffer(BufferTarget::Vertex, self.name));
	}

	pub fn unbind(&self) {
		gl_call!(self.gl, bind_buffer(BufferTarget::Vertex, 0));
	}
}

impl Drop for VertexBuffer {
	fn drop(&mut self) {
		log::trace!("deleting vertex buffer {} ({} bytes)", self.name, self.size);
		gl_call!(self.gl, delete_buffer(self.name));
	}
}


/// 32-bit triangle indices, uploaded once at creation.
#[derive(Debug)]
pub struct IndexBuffer {
	gl: Gl,
	name: u32,
	count: u32,
}

impl IndexBuffer {
	pub const ELEMENT_KIND: ElementKind = ElementKind::UnsignedInt;

	pub fn new(gl: &Gl, indices: &[u32]) -> anyhow::Result<IndexBuffer> {
		let gl = gl.clone();

		let name = gl_call!(gl, create_buffer());
		anyhow::ensure!(name != 0, "Failed to allocate index buffer ({} indices)", indices.len());

		gl_call!(gl, bind_buffer(BufferTarget::Index, name));
		gl_call!(gl, buffer_data(BufferTarget::Index, bytemuck::cast_slice(indices), BufferUsage::StaticDraw));

		log::trace!("created index buffer {name} ({} indices)", indices.len());

		Ok(IndexBuffer {
			gl,
			name,
			count: indices.len() as u32,
		})
	}

	pub fn name(&self) -> u32 {
		self.name
	}

	pub fn count(&self) -> u32 {
		self.count
	}

	pub fn bind(&self) {
		gl_call!(self.gl, bind_buffer(BufferTarget::Index, self.name));
	}

	pub fn unbind(&self) {
		gl_call!(self.gl, bind_buffer(BufferTarget::Index, 0));
	}
}

impl Drop for IndexBuffer {
	fn drop(&mut self) {
		gl_call!(self.gl, delete_buffer(self.name));
	}
}
