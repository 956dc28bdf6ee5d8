pub mod native;

#[cfg(test)]
pub mod recording;

use std::rc::Rc;

use crate::resource_manager::TextureParams;

pub use self::native::NativeBackend;


/// Shared handle to the graphics backend.
///
/// `Rc` keeps every wrapper `!Send`, which pins all GL work to the thread that owns the context.
pub type Gl = Rc<dyn Backend>;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum BufferTarget {
	Vertex = gl::ARRAY_BUFFER,
	Index = gl::ELEMENT_ARRAY_BUFFER,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum BufferUsage {
	StaticDraw = gl::STATIC_DRAW,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum ElementKind {
	Float = gl::FLOAT,
	UnsignedInt = gl::UNSIGNED_INT,
	UnsignedByte = gl::UNSIGNED_BYTE,
}

impl ElementKind {
	pub fn size(self) -> u32 {
		match self {
			ElementKind::Float => 4,
			ElementKind::UnsignedInt => 4,
			ElementKind::UnsignedByte => 1,
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum ShaderStage {
	Vertex = gl::VERTEX_SHADER,
	Fragment = gl::FRAGMENT_SHADER,
}

impl ShaderStage {
	pub fn label(self) -> &'static str {
		match self {
			ShaderStage::Vertex => "vertex",
			ShaderStage::Fragment => "fragment",
		}
	}
}

impl std::fmt::Display for ShaderStage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProgramStatus {
	Link = gl::LINK_STATUS,
	Validate = gl::VALIDATE_STATUS,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum PrimitiveType {
	Triangles = gl::TRIANGLES,
}


/// The slice of the GL API the resource wrappers are built on.
///
/// Names are driver-assigned and never zero for a live object. Passing `0` to a bind call
/// selects "none" on that target.
pub trait Backend: std::fmt::Debug {
	fn get_error(&self) -> u32;
	fn version_string(&self) -> String;

	fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
	fn clear_color(&self, color: [f32; 4]);
	fn clear(&self);
	fn enable_alpha_blending(&self);

	fn create_buffer(&self) -> u32;
	fn bind_buffer(&self, target: BufferTarget, name: u32);
	fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
	fn delete_buffer(&self, name: u32);

	fn create_vertex_array(&self) -> u32;
	fn bind_vertex_array(&self, name: u32);
	fn current_vertex_array(&self) -> u32;
	/// The element buffer recorded in the current vertex array.
	fn current_index_buffer(&self) -> u32;
	fn delete_vertex_array(&self, name: u32);
	fn enable_vertex_attrib_array(&self, index: u32);
	fn vertex_attrib_pointer(&self, index: u32, count: u32, kind: ElementKind, normalized: bool, stride: u32, offset: u32);

	fn create_shader(&self, stage: ShaderStage) -> u32;
	fn shader_source(&self, shader: u32, source: &str);
	fn compile_shader(&self, shader: u32);
	fn shader_compile_status(&self, shader: u32) -> bool;
	fn shader_info_log(&self, shader: u32) -> String;
	fn delete_shader(&self, shader: u32);

	fn create_program(&self) -> u32;
	fn attach_shader(&self, program: u32, shader: u32);
	fn link_program(&self, program: u32);
	fn validate_program(&self, program: u32);
	fn program_status(&self, program: u32, status: ProgramStatus) -> bool;
	fn program_info_log(&self, program: u32) -> String;
	fn use_program(&self, program: u32);
	fn current_program(&self) -> u32;
	fn delete_program(&self, program: u32);

	/// Returns -1 if the program has no active uniform called `name`.
	fn get_uniform_location(&self, program: u32, name: &str) -> i32;
	fn uniform_1i(&self, location: i32, value: i32);
	fn uniform_1f(&self, location: i32, value: f32);
	fn uniform_4f(&self, location: i32, value: [f32; 4]);
	fn uniform_matrix_4f(&self, location: i32, value: &[f32; 16]);

	fn create_texture(&self) -> u32;
	fn active_texture(&self, unit: u32);
	fn bind_texture(&self, name: u32);
	/// Applies `params` to the texture currently bound on the active unit.
	fn texture_parameters(&self, params: &TextureParams);
	/// Uploads tightly packed RGBA8 pixels to the texture currently bound on the active unit.
	fn tex_image_2d(&self, width: u32, height: u32, pixels: &[u8]);
	fn delete_texture(&self, name: u32);

	fn draw_elements(&self, primitive: PrimitiveType, count: u32, kind: ElementKind);
}
