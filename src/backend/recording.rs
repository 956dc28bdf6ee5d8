//! In-memory stand-in for a GL driver.
//!
//! Every mutating call is appended to a log, names are handed out from a counter, and the
//! "currently bound" registers are tracked so tests can observe binding order.

use super::{Backend, BufferTarget, BufferUsage, ElementKind, PrimitiveType, ProgramStatus, ShaderStage};
use crate::resource_manager::TextureParams;

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};


#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Viewport(i32, i32, i32, i32),
	ClearColor([f32; 4]),
	Clear,
	EnableAlphaBlending,

	CreateBuffer(u32),
	BindBuffer(BufferTarget, u32),
	BufferData { target: BufferTarget, data: Vec<u8>, usage: BufferUsage },
	DeleteBuffer(u32),

	CreateVertexArray(u32),
	BindVertexArray(u32),
	DeleteVertexArray(u32),
	EnableVertexAttribArray(u32),
	VertexAttribPointer { index: u32, count: u32, kind: ElementKind, normalized: bool, stride: u32, offset: u32 },

	CreateShader(ShaderStage, u32),
	ShaderSource(u32, String),
	CompileShader(u32),
	DeleteShader(u32),

	CreateProgram(u32),
	AttachShader(u32, u32),
	LinkProgram(u32),
	ValidateProgram(u32),
	UseProgram(u32),
	DeleteProgram(u32),

	GetUniformLocation(u32, String),
	Uniform1i(i32, i32),
	Uniform1f(i32, f32),
	Uniform4f(i32, [f32; 4]),
	UniformMatrix4f(i32, [f32; 16]),

	CreateTexture(u32),
	ActiveTexture(u32),
	BindTexture(u32),
	TextureParameters(TextureParams),
	TexImage2D { width: u32, height: u32, pixels: Vec<u8> },
	DeleteTexture(u32),

	DrawElements { primitive: PrimitiveType, count: u32, kind: ElementKind },
}


/// Object types whose creation can be refused with [`RecordingBackend::refuse_creation`].
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ObjectKind {
	Buffer,
	VertexArray,
	Shader,
	Program,
	Texture,
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BindMismatch {
	pub expected: u32,
	pub actual: u32,
}


#[derive(Debug, Default)]
struct Bindings {
	vertex_buffer: u32,
	// Keyed by vertex array; the element buffer binding is part of its state
	index_buffers: HashMap<u32, u32>,
	vertex_array: u32,
	program: u32,
	active_texture_unit: u32,
	textures: HashMap<u32, u32>,
}


#[derive(Debug, Default)]
pub struct RecordingBackend {
	calls: RefCell<Vec<Call>>,
	next_name: Cell<u32>,
	refused: RefCell<Vec<ObjectKind>>,
	bindings: RefCell<Bindings>,

	error_queue: RefCell<VecDeque<u32>>,
	error_after_next_call: Cell<Option<u32>>,
	get_error_count: Cell<usize>,

	uniforms: RefCell<HashMap<String, i32>>,
	failing_stage: RefCell<Option<(ShaderStage, String)>>,
	failing_link: RefCell<Option<String>>,
	shader_stages: RefCell<HashMap<u32, ShaderStage>>,
	linked_programs: RefCell<HashMap<u32, bool>>,
}

impl RecordingBackend {
	pub fn new() -> RecordingBackend {
		RecordingBackend::default()
	}

	/// Makes `names` resolvable by `get_uniform_location`, in declaration order from location 0.
	pub fn with_uniforms(self, names: &[&str]) -> RecordingBackend {
		{
			let mut uniforms = self.uniforms.borrow_mut();
			for name in names {
				let location = uniforms.len() as i32;
				uniforms.entry(name.to_string()).or_insert(location);
			}
		}

		self
	}

	pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
		*self.failing_stage.borrow_mut() = Some((stage, log.to_owned()));
	}

	pub fn fail_link(&self, log: &str) {
		*self.failing_link.borrow_mut() = Some(log.to_owned());
	}

	/// Makes every later create call for `kind` return 0, as a driver does when allocation fails.
	pub fn refuse_creation(&self, kind: ObjectKind) {
		self.refused.borrow_mut().push(kind);
	}

	/// Queues a driver error directly, as if some earlier unrelated call had raised it.
	pub fn push_error(&self, code: u32) {
		self.error_queue.borrow_mut().push_back(code);
	}

	/// Raises `code` as a consequence of the next recorded call.
	pub fn raise_after_next_call(&self, code: u32) {
		self.error_after_next_call.set(Some(code));
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.borrow().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.borrow_mut().clear();
	}

	pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
		self.calls.borrow().iter().filter(|call| pred(call)).count()
	}

	pub fn pending_errors(&self) -> usize {
		self.error_queue.borrow().len()
	}

	pub fn get_error_count(&self) -> usize {
		self.get_error_count.get()
	}

	pub fn bound_buffer(&self, target: BufferTarget) -> u32 {
		let bindings = self.bindings.borrow();

		match target {
			BufferTarget::Vertex => bindings.vertex_buffer,
			BufferTarget::Index => bindings.index_buffers.get(&bindings.vertex_array).copied().unwrap_or(0),
		}
	}

	pub fn bound_vertex_array(&self) -> u32 {
		self.bindings.borrow().vertex_array
	}

	pub fn bound_program(&self) -> u32 {
		self.bindings.borrow().program
	}

	pub fn bound_texture(&self, unit: u32) -> u32 {
		self.bindings.borrow().textures.get(&unit).copied().unwrap_or(0)
	}

	/// Checks that `expected` is the current selection on `target`.
	pub fn expect_bound(&self, target: BufferTarget, expected: u32) -> Result<(), BindMismatch> {
		let actual = self.bound_buffer(target);
		if actual == expected {
			Ok(())
		} else {
			Err(BindMismatch { expected, actual })
		}
	}

	fn record(&self, call: Call) {
		self.calls.borrow_mut().push(call);

		if let Some(code) = self.error_after_next_call.take() {
			self.error_queue.borrow_mut().push_back(code);
		}
	}

	fn new_name(&self, kind: ObjectKind) -> u32 {
		if self.refused.borrow().contains(&kind) {
			return 0;
		}

		let name = self.next_name.get() + 1;
		self.next_name.set(name);
		name
	}
}


impl Backend for RecordingBackend {
	fn get_error(&self) -> u32 {
		self.get_error_count.set(self.get_error_count.get() + 1);
		self.error_queue.borrow_mut().pop_front().unwrap_or(gl::NO_ERROR)
	}

	fn version_string(&self) -> String {
		String::from("3.3.0 Recording")
	}

	fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
		self.record(Call::Viewport(x, y, width, height));
	}

	fn clear_color(&self, color: [f32; 4]) {
		self.record(Call::ClearColor(color));
	}

	fn clear(&self) {
		self.record(Call::Clear);
	}

	fn enable_alpha_blending(&self) {
		self.record(Call::EnableAlphaBlending);
	}


	fn create_buffer(&self) -> u32 {
		let name = self.new_name(ObjectKind::Buffer);
		self.record(Call::CreateBuffer(name));
		name
	}

	fn bind_buffer(&self, target: BufferTarget, name: u32) {
		let mut bindings = self.bindings.borrow_mut();
		match target {
			BufferTarget::Vertex => bindings.vertex_buffer = name,
			BufferTarget::Index => {
				let vertex_array = bindings.vertex_array;
				bindings.index_buffers.insert(vertex_array, name);
			}
		}
		drop(bindings);

		self.record(Call::BindBuffer(target, name));
	}

	fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
		self.record(Call::BufferData { target, data: data.to_vec(), usage });
	}

	fn delete_buffer(&self, name: u32) {
		let mut bindings = self.bindings.borrow_mut();
		if bindings.vertex_buffer == name {
			bindings.vertex_buffer = 0;
		}
		for bound in bindings.index_buffers.values_mut() {
			if *bound == name {
				*bound = 0;
			}
		}
		drop(bindings);

		self.record(Call::DeleteBuffer(name));
	}


	fn create_vertex_array(&self) -> u32 {
		let name = self.new_name(ObjectKind::VertexArray);
		self.record(Call::CreateVertexArray(name));
		name
	}

	fn bind_vertex_array(&self, name: u32) {
		self.bindings.borrow_mut().vertex_array = name;
		self.record(Call::BindVertexArray(name));
	}

	fn current_vertex_array(&self) -> u32 {
		self.bound_vertex_array()
	}

	fn current_index_buffer(&self) -> u32 {
		self.bound_buffer(BufferTarget::Index)
	}

	fn delete_vertex_array(&self, name: u32) {
		let mut bindings = self.bindings.borrow_mut();
		if bindings.vertex_array == name {
			bindings.vertex_array = 0;
		}
		bindings.index_buffers.remove(&name);
		drop(bindings);

		self.record(Call::DeleteVertexArray(name));
	}

	fn enable_vertex_attrib_array(&self, index: u32) {
		self.record(Call::EnableVertexAttribArray(index));
	}

	fn vertex_attrib_pointer(&self, index: u32, count: u32, kind: ElementKind, normalized: bool, stride: u32, offset: u32) {
		self.record(Call::VertexAttribPointer { index, count, kind, normalized, stride, offset });
	}


	fn create_shader(&self, stage: ShaderStage) -> u32 {
		let name = self.new_name(ObjectKind::Shader);
		self.shader_stages.borrow_mut().insert(name, stage);
		self.record(Call::CreateShader(stage, name));
		name
	}

	fn shader_source(&self, shader: u32, source: &str) {
		self.record(Call::ShaderSource(shader, source.to_owned()));
	}

	fn compile_shader(&self, shader: u32) {
		self.record(Call::CompileShader(shader));
	}

	fn shader_compile_status(&self, shader: u32) -> bool {
		let stage = self.shader_stages.borrow().get(&shader).copied();

		match &*self.failing_stage.borrow() {
			Some((failing, _)) => stage != Some(*failing),
			None => true,
		}
	}

	fn shader_info_log(&self, shader: u32) -> String {
		let stage = self.shader_stages.borrow().get(&shader).copied();

		match &*self.failing_stage.borrow() {
			Some((failing, log)) if stage == Some(*failing) => log.clone(),
			_ => String::new(),
		}
	}

	fn delete_shader(&self, shader: u32) {
		self.record(Call::DeleteShader(shader));
	}


	fn create_program(&self) -> u32 {
		let name = self.new_name(ObjectKind::Program);
		self.record(Call::CreateProgram(name));
		name
	}

	fn attach_shader(&self, program: u32, shader: u32) {
		self.record(Call::AttachShader(program, shader));
	}

	fn link_program(&self, program: u32) {
		let linked = self.failing_link.borrow().is_none();
		self.linked_programs.borrow_mut().insert(program, linked);
		self.record(Call::LinkProgram(program));
	}

	fn validate_program(&self, program: u32) {
		self.record(Call::ValidateProgram(program));
	}

	fn program_status(&self, program: u32, _status: ProgramStatus) -> bool {
		self.linked_programs.borrow().get(&program).copied().unwrap_or(false)
	}

	fn program_info_log(&self, _program: u32) -> String {
		self.failing_link.borrow().clone().unwrap_or_default()
	}

	fn use_program(&self, program: u32) {
		self.bindings.borrow_mut().program = program;
		self.record(Call::UseProgram(program));
	}

	fn current_program(&self) -> u32 {
		self.bindings.borrow().program
	}

	fn delete_program(&self, program: u32) {
		let mut bindings = self.bindings.borrow_mut();
		if bindings.program == program {
			bindings.program = 0;
		}
		drop(bindings);

		self.record(Call::DeleteProgram(program));
	}


	fn get_uniform_location(&self, program: u32, name: &str) -> i32 {
		self.record(Call::GetUniformLocation(program, name.to_owned()));
		self.uniforms.borrow().get(name).copied().unwrap_or(-1)
	}

	fn uniform_1i(&self, location: i32, value: i32) {
		self.record(Call::Uniform1i(location, value));
	}

	fn uniform_1f(&self, location: i32, value: f32) {
		self.record(Call::Uniform1f(location, value));
	}

	fn uniform_4f(&self, location: i32, value: [f32; 4]) {
		self.record(Call::Uniform4f(location, value));
	}

	fn uniform_matrix_4f(&self, location: i32, value: &[f32; 16]) {
		self.record(Call::UniformMatrix4f(location, *value));
	}


	fn create_texture(&self) -> u32 {
		let name = self.new_name(ObjectKind::Texture);
		self.record(Call::CreateTexture(name));
		name
	}

	fn active_texture(&self, unit: u32) {
		self.bindings.borrow_mut().active_texture_unit = unit;
		self.record(Call::ActiveTexture(unit));
	}

	fn bind_texture(&self, name: u32) {
		let mut bindings = self.bindings.borrow_mut();
		let unit = bindings.active_texture_unit;
		bindings.textures.insert(unit, name);
		drop(bindings);

		self.record(Call::BindTexture(name));
	}

	fn texture_parameters(&self, params: &TextureParams) {
		self.record(Call::TextureParameters(*params));
	}

	fn tex_image_2d(&self, width: u32, height: u32, pixels: &[u8]) {
		self.record(Call::TexImage2D { width, height, pixels: pixels.to_vec() });
	}

	fn delete_texture(&self, name: u32) {
		let mut bindings = self.bindings.borrow_mut();
		for bound in bindings.textures.values_mut() {
			if *bound == name {
				*bound = 0;
			}
		}
		drop(bindings);

		self.record(Call::DeleteTexture(name));
	}


	fn draw_elements(&self, primitive: PrimitiveType, count: u32, kind: ElementKind) {
		self.record(Call::DrawElements { primitive, count, kind });
	}
}
