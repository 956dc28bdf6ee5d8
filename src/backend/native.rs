use super::{Backend, BufferTarget, BufferUsage, ElementKind, PrimitiveType, ProgramStatus, ShaderStage};
use crate::resource_manager::TextureParams;

use std::ffi::{CStr, CString};


/// Forwards to the process-global function pointers loaded by `gl::load_with`.
///
/// Only valid while the context the pointers were loaded for is current on this thread.
#[derive(Debug)]
pub struct NativeBackend {
	_private: (),
}

impl NativeBackend {
	/// # Safety
	/// `gl::load_with` must have been called for a context that is current on the calling thread.
	pub unsafe fn new() -> NativeBackend {
		NativeBackend { _private: () }
	}
}


impl Backend for NativeBackend {
	fn get_error(&self) -> u32 {
		unsafe { gl::GetError() }
	}

	fn version_string(&self) -> String {
		unsafe {
			let ptr = gl::GetString(gl::VERSION);
			if ptr.is_null() {
				return String::from("unknown");
			}

			CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
		}
	}

	fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
		unsafe { gl::Viewport(x, y, width, height) }
	}

	fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
		unsafe { gl::ClearColor(r, g, b, a) }
	}

	fn clear(&self) {
		unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
	}

	fn enable_alpha_blending(&self) {
		unsafe {
			gl::Enable(gl::BLEND);
			gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
		}
	}


	fn create_buffer(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GenBuffers(1, &mut name) }
		name
	}

	fn bind_buffer(&self, target: BufferTarget, name: u32) {
		unsafe { gl::BindBuffer(target as u32, name) }
	}

	fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
		unsafe {
			gl::BufferData(target as u32, data.len() as isize, data.as_ptr() as *const _, usage as u32);
		}
	}

	fn delete_buffer(&self, name: u32) {
		unsafe { gl::DeleteBuffers(1, &name) }
	}


	fn create_vertex_array(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GenVertexArrays(1, &mut name) }
		name
	}

	fn bind_vertex_array(&self, name: u32) {
		unsafe { gl::BindVertexArray(name) }
	}

	fn current_vertex_array(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut name) }
		name as u32
	}

	fn current_index_buffer(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GetIntegerv(gl::ELEMENT_ARRAY_BUFFER_BINDING, &mut name) }
		name as u32
	}

	fn delete_vertex_array(&self, name: u32) {
		unsafe { gl::DeleteVertexArrays(1, &name) }
	}

	fn enable_vertex_attrib_array(&self, index: u32) {
		unsafe { gl::EnableVertexAttribArray(index) }
	}

	fn vertex_attrib_pointer(&self, index: u32, count: u32, kind: ElementKind, normalized: bool, stride: u32, offset: u32) {
		let normalized = if normalized { gl::TRUE } else { gl::FALSE };

		// Offset is relative to the start of the currently bound ARRAY_BUFFER
		let offset_ptr = offset as usize as *const _;

		unsafe {
			gl::VertexAttribPointer(index, count as i32, kind as u32, normalized, stride as i32, offset_ptr);
		}
	}


	fn create_shader(&self, stage: ShaderStage) -> u32 {
		unsafe { gl::CreateShader(stage as u32) }
	}

	fn shader_source(&self, shader: u32, source: &str) {
		let source_ptr = source.as_ptr() as *const gl::types::GLchar;
		let source_len = source.len() as i32;

		unsafe {
			gl::ShaderSource(shader, 1, &source_ptr, &source_len);
		}
	}

	fn compile_shader(&self, shader: u32) {
		unsafe { gl::CompileShader(shader) }
	}

	fn shader_compile_status(&self, shader: u32) -> bool {
		let mut status = 0;
		unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) }
		status != 0
	}

	fn shader_info_log(&self, shader: u32) -> String {
		let mut length = 0;
		unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length) }

		let mut buf = vec![0u8; length.max(1) as usize];
		let mut written = 0;
		unsafe {
			gl::GetShaderInfoLog(shader, buf.len() as i32, &mut written, buf.as_mut_ptr() as *mut _);
		}

		buf.truncate(written.max(0) as usize);
		String::from_utf8_lossy(&buf).into_owned()
	}

	fn delete_shader(&self, shader: u32) {
		unsafe { gl::DeleteShader(shader) }
	}


	fn create_program(&self) -> u32 {
		unsafe { gl::CreateProgram() }
	}

	fn attach_shader(&self, program: u32, shader: u32) {
		unsafe { gl::AttachShader(program, shader) }
	}

	fn link_program(&self, program: u32) {
		unsafe { gl::LinkProgram(program) }
	}

	fn validate_program(&self, program: u32) {
		unsafe { gl::ValidateProgram(program) }
	}

	fn program_status(&self, program: u32, status: ProgramStatus) -> bool {
		let mut value = 0;
		unsafe { gl::GetProgramiv(program, status as u32, &mut value) }
		value != 0
	}

	fn program_info_log(&self, program: u32) -> String {
		let mut length = 0;
		unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length) }

		let mut buf = vec![0u8; length.max(1) as usize];
		let mut written = 0;
		unsafe {
			gl::GetProgramInfoLog(program, buf.len() as i32, &mut written, buf.as_mut_ptr() as *mut _);
		}

		buf.truncate(written.max(0) as usize);
		String::from_utf8_lossy(&buf).into_owned()
	}

	fn use_program(&self, program: u32) {
		unsafe { gl::UseProgram(program) }
	}

	fn current_program(&self) -> u32 {
		let mut program = 0;
		unsafe { gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut program) }
		program as u32
	}

	fn delete_program(&self, program: u32) {
		unsafe { gl::DeleteProgram(program) }
	}


	fn get_uniform_location(&self, program: u32, name: &str) -> i32 {
		// An interior nul can never name an active uniform
		let Ok(name) = CString::new(name) else {
			return -1
		};

		unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
	}

	fn uniform_1i(&self, location: i32, value: i32) {
		unsafe { gl::Uniform1i(location, value) }
	}

	fn uniform_1f(&self, location: i32, value: f32) {
		unsafe { gl::Uniform1f(location, value) }
	}

	fn uniform_4f(&self, location: i32, [x, y, z, w]: [f32; 4]) {
		unsafe { gl::Uniform4f(location, x, y, z, w) }
	}

	fn uniform_matrix_4f(&self, location: i32, value: &[f32; 16]) {
		unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) }
	}


	fn create_texture(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GenTextures(1, &mut name) }
		name
	}

	fn active_texture(&self, unit: u32) {
		unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) }
	}

	fn bind_texture(&self, name: u32) {
		unsafe { gl::BindTexture(gl::TEXTURE_2D, name) }
	}

	fn texture_parameters(&self, params: &TextureParams) {
		let parameters = [
			(gl::TEXTURE_MIN_FILTER, params.min_filter as i32),
			(gl::TEXTURE_MAG_FILTER, params.mag_filter as i32),
			(gl::TEXTURE_WRAP_S, params.wrap as i32),
			(gl::TEXTURE_WRAP_T, params.wrap as i32),
		];

		for (parameter, value) in parameters {
			unsafe { gl::TexParameteri(gl::TEXTURE_2D, parameter, value) }
		}
	}

	fn tex_image_2d(&self, width: u32, height: u32, pixels: &[u8]) {
		let (level, border) = (0, 0);

		unsafe {
			gl::TexImage2D(gl::TEXTURE_2D, level, gl::RGBA8 as i32,
				width as i32, height as i32, border,
				gl::RGBA,
				gl::UNSIGNED_BYTE,
				pixels.as_ptr() as *const _);
		}
	}

	fn delete_texture(&self, name: u32) {
		unsafe { gl::DeleteTextures(1, &name) }
	}


	fn draw_elements(&self, primitive: PrimitiveType, count: u32, kind: ElementKind) {
		unsafe {
			gl::DrawElements(primitive as u32, count as i32, kind as u32, std::ptr::null());
		}
	}
}
