mod backend;
mod config;
mod context;
mod debug;
mod logging;
mod main_loop;
mod renderer;
mod resource_manager;

use backend::Gl;
use config::AppConfig;
use context::Context;
use resource_manager::*;

use glam::{Mat4, Vec3};
use std::time::Duration;


fn main() -> anyhow::Result<()> {
	let config = AppConfig::default();
	logging::init_logging(config.logging.clone());

	main_loop::run(config.clone(), move |gl| Sandbox::new(gl, &config))
}



#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Vertex {
	position: [f32; 2],
	tex_coord: [f32; 2],
}

impl Vertex {
	const fn new(x: f32, y: f32, u: f32, v: f32) -> Vertex {
		Vertex { position: [x, y], tex_coord: [u, v] }
	}
}


// Two quads of the same textured mesh, positioned in pixel space.
struct Sandbox {
	vertex_array: VertexArray,
	// Referenced by `vertex_array`
	_vertex_buffer: VertexBuffer,
	index_buffer: IndexBuffer,
	shader: Shader,
	texture: Texture,

	projection: Mat4,
	view: Mat4,
	translation_a: Vec3,
	translation_b: Vec3,

	red_channel: f32,
	increment: f32,
	time: f32,

	context: Context,
}

impl Sandbox {
	fn new(gl: Gl, config: &AppConfig) -> anyhow::Result<Self> {
		let context = Context::new(gl, config)?;

		let mut shader = context.resource_manager.load_shader("shaders/basic.shader".as_ref())?;
		let texture = context.resource_manager.load_texture("textures/logo.png".as_ref())?;

		// Quad covers the texture at 1.5 pixels per texel
		let half_width = texture.width() as f32 * 0.75;
		let half_height = texture.height() as f32 * 0.75;

		let vertices = [
			Vertex::new(-half_width, -half_height, 0.0, 0.0),
			Vertex::new( half_width, -half_height, 1.0, 0.0),
			Vertex::new( half_width,  half_height, 1.0, 1.0),
			Vertex::new(-half_width,  half_height, 0.0, 1.0),
		];

		let indices = [
			0, 1, 2,
			2, 3, 0,
		];

		let vertex_buffer = context.vertex_buffer(&vertices)?;

		let mut layout = VertexBufferLayout::new();
		layout.push::<f32>(2)
			.push::<f32>(2);

		let mut vertex_array = context.vertex_array()?;
		vertex_array.add_buffer(&vertex_buffer, &layout);

		let index_buffer = context.index_buffer(&indices)?;

		shader.bind();
		shader.set_uniform_1i("u_Texture", 0);

		vertex_array.unbind();
		vertex_buffer.unbind();
		index_buffer.unbind();
		shader.unbind();
		texture.unbind();

		let (width, height) = (config.window.width as f32, config.window.height as f32);

		Ok(Sandbox {
			vertex_array,
			_vertex_buffer: vertex_buffer,
			index_buffer,
			shader,
			texture,

			projection: Mat4::orthographic_rh_gl(0.0, width, 0.0, height, -1.0, 1.0),
			view: Mat4::from_translation(Vec3::new(-100.0, 0.0, 0.0)),
			translation_a: Vec3::new(300.0, 200.0, 0.0),
			translation_b: Vec3::new(600.0, 200.0, 0.0),

			red_channel: 0.0,
			increment: 0.05,
			time: 0.0,

			context,
		})
	}
}

impl main_loop::MainLoop for Sandbox {
	fn present(&mut self, delta: Duration) {
		self.time += delta.as_secs_f32();
		log::trace!("frame time {:.3} ms", delta.as_secs_f64() * 1000.0);

		if self.red_channel > 1.0 {
			self.increment = -0.05;
		} else if self.red_channel < 0.0 {
			self.increment = 0.05;
		}
		self.red_channel += self.increment;

		self.translation_b.y = 200.0 + 100.0 * self.time.sin();

		let renderer = &self.context.renderer;
		renderer.clear();

		self.texture.bind(0);

		let view_projection = self.projection * self.view;

		self.shader.bind();
		self.shader.set_uniform_4f("u_Color", self.red_channel, 0.3, 0.8, 1.0);
		self.shader.set_uniform_1f("u_Fade", 0.75 + 0.25 * self.time.cos());
		self.shader.set_uniform_mat4f("u_MVP", &(view_projection * Mat4::from_translation(self.translation_a)));
		renderer.draw(&self.vertex_array, &self.index_buffer, &self.shader);

		// Same mesh and program, so only the transform changes
		self.shader.set_uniform_mat4f("u_MVP", &(view_projection * Mat4::from_translation(self.translation_b)));
		renderer.draw_bound(&self.vertex_array, &self.index_buffer, &self.shader);
	}

	fn resize(&mut self, width: u32, height: u32) {
		self.context.resize(width, height);
	}
}
