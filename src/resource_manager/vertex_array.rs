use super::{VertexBuffer, VertexBufferLayout};
use crate::backend::Gl;
use crate::debug::gl_call;


/// Attribute bindings for one or more vertex buffers.
///
/// The attribute state lives in the driver, against whichever array is current when
/// `add_buffer` runs, so `add_buffer` always rebinds this array first.
#[derive(Debug)]
pub struct VertexArray {
	gl: Gl,
	name: u32,
	next_attribute: u32,
}

impl VertexArray {
	pub fn new(gl: &Gl) -> anyhow::Result<VertexArray> {
		let gl = gl.clone();

		let name = gl_call!(gl, create_vertex_array());
		anyhow::ensure!(name != 0, "Failed to allocate vertex array");

		log::trace!("created vertex array {name}");

		Ok(VertexArray {
			gl,
			name,
			next_attribute: 0,
		})
	}

	pub fn name(&self) -> u32 {
		self.name
	}

	/// Slots assigned so far. The next `add_buffer` starts at this index.
	#[cfg(test)]
	pub fn attribute_count(&self) -> u32 {
		self.next_attribute
	}

	pub fn add_buffer(&mut self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
		self.bind();
		buffer.bind();

		let stride = layout.stride();

		for attribute in layout.attributes() {
			let index = self.next_attribute;

			gl_call!(self.gl, enable_vertex_attrib_array(index));
			gl_call!(self.gl, vertex_attrib_pointer(index, attribute.count, attribute.kind,
				attribute.normalized, stride, attribute.offset));

			self.next_attribute += 1;
		}
	}

	pub fn bind(&self) {
		gl_call!(self.gl, bind_vertex_array(self.name));
	}

	pub fn unbind(&self) {
		gl_call!(self.gl, bind_vertex_array(0));
	}
}

impl Drop for VertexArray {
	fn drop(&mut self) {
		gl_call!(self.gl, delete_vertex_array(self.name));
	}
}
