//! GL entry point loading for raw `gl` calls and native handle lookup.

use std::ffi::c_void;
use std::sync::Once;

pub(crate) static GL_INIT_ONCE: Once = Once::new();

/// Load function pointers for the raw `gl` crate.
///
/// Done exactly once via `gl_loader`; the context glium created must be
/// current.
pub fn load_gl() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
    });
}

/// Address of `symbol` in the platform GL library, if it resolves.
pub(crate) fn proc_address(symbol: &str) -> Option<*const c_void> {
    load_gl();
    let ptr: *const c_void = gl_loader::get_proc_address(symbol).cast();
    (!ptr.is_null()).then_some(ptr)
}
