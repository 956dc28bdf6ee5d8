use crate::backend::{Gl, PrimitiveType};
use crate::debug::gl_call;
use crate::resource_manager::{IndexBuffer, Shader, VertexArray};


/// Issues indexed draws.
#[derive(Debug)]
pub struct Renderer {
	gl: Gl,
}

impl Renderer {
	pub fn new(gl: &Gl) -> Renderer {
		Renderer { gl: gl.clone() }
	}

	pub fn set_clear_color(&self, color: [f32; 4]) {
		gl_call!(self.gl, clear_color(color));
	}

	pub fn clear(&self) {
		gl_call!(self.gl, clear());
	}

	/// Binds all three inputs, then draws. Nothing is assumed about what was bound before.
	pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
		shader.bind();
		vertex_array.bind();
		index_buffer.bind();

		self.draw_bound(vertex_array, index_buffer, shader);
	}

	/// Draws with the current bindings, which must already select all three inputs.
	/// Debug builds check the selection and panic on a mismatch.
	pub fn draw_bound(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
		debug_assert_eq!(self.gl.current_program(), shader.name(),
			"shader '{}' must be bound to draw", shader.label());
		debug_assert_eq!(self.gl.current_vertex_array(), vertex_array.name(),
			"vertex array {} must be bound to draw", vertex_array.name());
		debug_assert_eq!(self.gl.current_index_buffer(), index_buffer.name(),
			"index buffer {} must be bound to draw", index_buffer.name());

		gl_call!(self.gl, draw_elements(PrimitiveType::Triangles, index_buffer.count(), IndexBuffer::ELEMENT_KIND));
	}
}
