use crate::backend::{Backend, Gl, ProgramStatus, ShaderStage};
use crate::debug::gl_call;

use std::collections::HashMap;
use std::path::{Path, PathBuf};


/// Marks the start of a stage section, e.g. `#shader vertex`.
pub const SECTION_MARKER: &str = "#shader";


#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
	#[error("failed to read shader '{}'", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("driver failed to create a {0} shader object")]
	CreateStage(ShaderStage),

	#[error("driver failed to create a program object")]
	CreateProgram,

	#[error("shader source has no {0} section")]
	MissingStage(ShaderStage),

	#[error("failed to compile {stage} shader:\n{log}")]
	Compile {
		stage: ShaderStage,
		log: String,
	},

	#[error("failed to link shader program:\n{log}")]
	Link {
		log: String,
	},
}


#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderProgramSource {
	pub vertex: String,
	pub fragment: String,
}

impl ShaderProgramSource {
	pub fn stage(&self, stage: ShaderStage) -> &str {
		match stage {
			ShaderStage::Vertex => &self.vertex,
			ShaderStage::Fragment => &self.fragment,
		}
	}

	fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
		match stage {
			ShaderStage::Vertex => &mut self.vertex,
			ShaderStage::Fragment => &mut self.fragment,
		}
	}
}


/// Splits a combined source file into its vertex and fragment sections.
///
/// Lines before the first marker are dropped. A marker naming neither stage leaves the current
/// section selected.
pub fn parse_shader(source: &str) -> ShaderProgramSource {
	let mut parsed = ShaderProgramSource::default();
	let mut current = None;

	for line in source.lines() {
		if line.contains(SECTION_MARKER) {
			if line.contains("vertex") {
				current = Some(ShaderStage::Vertex);
			} else if line.contains("fragment") {
				current = Some(ShaderStage::Fragment);
			}

			continue
		}

		if let Some(stage) = current {
			let section = parsed.stage_mut(stage);
			section.push_str(line);
			section.push('\n');
		}
	}

	parsed
}


/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Shader {
	gl: Gl,
	name: u32,
	label: String,
	uniform_location_cache: HashMap<String, i32>,
}

impl Shader {
	pub const UNIFORM_NOT_FOUND: i32 = -1;

	pub fn open(gl: &Gl, path: &Path) -> Result<Shader, ShaderError> {
		let content = std::fs::read_to_string(path)
			.map_err(|source| ShaderError::Read { path: path.to_owned(), source })?;

		Shader::from_source(gl, &parse_shader(&content), &path.display().to_string())
	}

	pub fn from_source(gl: &Gl, source: &ShaderProgramSource, label: &str) -> Result<Shader, ShaderError> {
		let gl = gl.clone();

		for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
			if source.stage(stage).trim().is_empty() {
				return Err(ShaderError::MissingStage(stage));
			}
		}

		let vertex_shader = compile_stage(&*gl, ShaderStage::Vertex, &source.vertex)?;
		let fragment_shader = match compile_stage(&*gl, ShaderStage::Fragment, &source.fragment) {
			Ok(shader) => shader,
			Err(error) => {
				gl_call!(gl, delete_shader(vertex_shader));
				return Err(error);
			}
		};

		let program = gl_call!(gl, create_program());
		if program == 0 {
			gl_call!(gl, delete_shader(vertex_shader));
			gl_call!(gl, delete_shader(fragment_shader));
			return Err(ShaderError::CreateProgram);
		}

		gl_call!(gl, attach_shader(program, vertex_shader));
		gl_call!(gl, attach_shader(program, fragment_shader));
		gl_call!(gl, link_program(program));

		let linked = gl_call!(gl, program_status(program, ProgramStatus::Link));

		// The program keeps what it needs from the stages after linking
		gl_call!(gl, delete_shader(vertex_shader));
		gl_call!(gl, delete_shader(fragment_shader));

		if !linked {
			let log = gl_call!(gl, program_info_log(program));
			gl_call!(gl, delete_program(program));

			log::error!("Failed to link shader '{label}':\n{log}");
			return Err(ShaderError::Link { log });
		}

		#[cfg(debug_assertions)]
		{
			gl_call!(gl, validate_program(program));
			if !gl_call!(gl, program_status(program, ProgramStatus::Validate)) {
				let log = gl_call!(gl, program_info_log(program));
				log::warn!("Shader '{label}' failed validation:\n{log}");
			}
		}

		log::debug!("created shader program {program} from '{label}'");

		Ok(Shader {
			gl,
			name: program,
			label: label.to_owned(),
			uniform_location_cache: HashMap::new(),
		})
	}

	pub fn name(&self) -> u32 {
		self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn bind(&self) {
		gl_call!(self.gl, use_program(self.name));
	}

	pub fn unbind(&self) {
		gl_call!(self.gl, use_program(0));
	}

	/// Looks up `name`, asking the driver only the first time. Misses are cached too.
	pub fn uniform_location(&mut self, name: &str) -> i32 {
		if let Some(&location) = self.uniform_location_cache.get(name) {
			return location;
		}

		let location = gl_call!(self.gl, get_uniform_location(self.name, name));
		if location == Shader::UNIFORM_NOT_FOUND {
			log::warn!("Uniform '{name}' doesn't exist in shader '{}'", self.label);
		}

		self.uniform_location_cache.insert(name.to_owned(), location);
		location
	}

	// Uniform writes go to whichever program is current, so this one has to be bound.
	pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
		if let Some(location) = self.resolve_for_write(name) {
			gl_call!(self.gl, uniform_1i(location, value));
		}
	}

	pub fn set_uniform_1f(&mut self, name: &str, value: f32) {
		if let Some(location) = self.resolve_for_write(name) {
			gl_call!(self.gl, uniform_1f(location, value));
		}
	}

	pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
		if let Some(location) = self.resolve_for_write(name) {
			gl_call!(self.gl, uniform_4f(location, [v0, v1, v2, v3]));
		}
	}

	pub fn set_uniform_mat4f(&mut self, name: &str, matrix: &glam::Mat4) {
		if let Some(location) = self.resolve_for_write(name) {
			gl_call!(self.gl, uniform_matrix_4f(location, &matrix.to_cols_array()));
		}
	}

	fn resolve_for_write(&mut self, name: &str) -> Option<i32> {
		debug_assert_eq!(self.gl.current_program(), self.name,
			"shader '{}' must be bound before setting '{name}'", self.label);

		let location = self.uniform_location(name);
		(location != Shader::UNIFORM_NOT_FOUND).then_some(location)
	}
}

impl Drop for Shader {
	fn drop(&mut self) {
		gl_call!(self.gl, delete_program(self.name));
	}
}


fn compile_stage(gl: &dyn Backend, stage: ShaderStage, source: &str) -> Result<u32, ShaderError> {
	let shader = gl_call!(gl, create_shader(stage));
	if shader == 0 {
		return Err(ShaderError::CreateStage(stage));
	}

	gl_call!(gl, shader_source(shader, source));
	gl_call!(gl, compile_shader(shader));

	if !gl_call!(gl, shader_compile_status(shader)) {
		let log = gl_call!(gl, shader_info_log(shader));
		gl_call!(gl, delete_shader(shader));

		log::error!("Failed to compile {stage} shader:\n{log}");
		return Err(ShaderError::Compile { stage, log });
	}

	Ok(shader)
}
