#![allow(clippy::all, non_upper_case_globals, non_snake_case, unused)]

include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
