use crate::backend::Backend;


/// Wraps a single backend call with the driver error checks.
///
/// With `debug_assertions` the error queue is drained before the call and inspected after it, and
/// any reported error aborts via panic with the call site attached. Without them the call is issued
/// bare.
///
/// `$gl` must be a `Gl` (or another `Rc` of a backend) or a `&dyn Backend`.
macro_rules! gl_call {
	($gl:expr, $method:ident ( $($arg:expr),* $(,)? )) => {{
		let backend: &dyn $crate::backend::Backend = &*$gl;

		#[cfg(debug_assertions)]
		$crate::debug::clear_errors(backend);

		let result = backend.$method($($arg),*);

		#[cfg(debug_assertions)]
		$crate::debug::assert_no_error(backend,
			concat!(stringify!($method), "(", stringify!($($arg),*), ")"),
			file!(), line!());

		result
	}};
}

pub(crate) use gl_call;


/// Drains every pending error flag so a later check only sees errors raised after this point.
pub fn clear_errors(gl: &dyn Backend) {
	while gl.get_error() != gl::NO_ERROR {}
}

/// Reads the next pending error. Returns `false` and logs it if there was one.
pub fn check_and_log_errors(gl: &dyn Backend, label: &str, file: &str, line: u32) -> bool {
	let error = gl.get_error();
	if error == gl::NO_ERROR {
		return true;
	}

	log::error!("[OpenGL Error] {} ({:#06x}) {} {}:{}", error_name(error), error, label, file, line);
	false
}

#[track_caller]
pub fn assert_no_error(gl: &dyn Backend, label: &str, file: &str, line: u32) {
	if !check_and_log_errors(gl, label, file, line) {
		panic!("OpenGL call failed: {label} at {file}:{line}");
	}
}

pub fn error_name(code: u32) -> &'static str {
	match code {
		gl::NO_ERROR => "GL_NO_ERROR",
		gl::INVALID_ENUM => "GL_INVALID_ENUM",
		gl::INVALID_VALUE => "GL_INVALID_VALUE",
		gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
		gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
		gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
		_ => "unknown error",
	}
}
