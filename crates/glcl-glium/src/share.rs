//! Native handles of the current GL context, for compute-context sharing.
//!
//! GLX, WGL and CGL getters are looked up through `gl_loader`. glutin falls
//! back to EGL (always on Wayland), whose getters live in libEGL rather than
//! libGL, so those are resolved from the already-loaded libEGL instead.

use std::ffi::c_void;

use gpu_interop::{GlShareHandles, WindowSystem};
use tracing::debug;

use crate::loader;

type GetCurrent = unsafe extern "system" fn() -> *mut c_void;

/// Resolve `symbol` as a no-argument getter and call it. `None` if the symbol
/// is missing or returns null.
unsafe fn call_getter(symbol: &str) -> Option<usize> {
    let ptr = loader::proc_address(symbol)?;
    let getter: GetCurrent = std::mem::transmute(ptr);
    let handle = getter();
    (!handle.is_null()).then_some(handle as usize)
}

/// Handles of the context current on this thread, or `None` if no context is
/// current.
pub fn current_share_handles() -> Option<GlShareHandles> {
    let handles = unsafe { platform_handles() };
    match &handles {
        Some(h) => debug!(window_system = ?h.window_system, "found current GL context"),
        None => debug!("no current GL context"),
    }
    handles
}

#[cfg(target_os = "macos")]
unsafe fn platform_handles() -> Option<GlShareHandles> {
    type GetShareGroup = unsafe extern "C" fn(*mut c_void) -> *mut c_void;

    let context = call_getter("CGLGetCurrentContext")?;
    let share_group_fn: GetShareGroup =
        std::mem::transmute(loader::proc_address("CGLGetShareGroup")?);
    let share_group = share_group_fn(context as *mut c_void);
    if share_group.is_null() {
        return None;
    }
    Some(GlShareHandles {
        window_system: WindowSystem::Cgl,
        context,
        display: 0,
        share_group: share_group as usize,
    })
}

#[cfg(target_os = "windows")]
unsafe fn platform_handles() -> Option<GlShareHandles> {
    Some(GlShareHandles {
        window_system: WindowSystem::Wgl,
        context: call_getter("wglGetCurrentContext")?,
        display: call_getter("wglGetCurrentDC")?,
        share_group: 0,
    })
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
unsafe fn platform_handles() -> Option<GlShareHandles> {
    glx_handles().or_else(|| egl::current_handles())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
unsafe fn glx_handles() -> Option<GlShareHandles> {
    Some(GlShareHandles {
        window_system: WindowSystem::Glx,
        context: call_getter("glXGetCurrentContext")?,
        display: call_getter("glXGetCurrentDisplay")?,
        share_group: 0,
    })
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
mod egl {
    use libloading::{Library, Symbol};
    use tracing::debug;

    use super::{GetCurrent, GlShareHandles, WindowSystem};

    const LIBRARY_NAMES: [&str; 2] = ["libEGL.so.1", "libEGL.so"];

    /// The process's libEGL. glutin loaded it when it picked EGL, so this
    /// yields the same instance and therefore the same current context.
    unsafe fn open() -> Option<Library> {
        LIBRARY_NAMES.iter().find_map(|name| match Library::new(name) {
            Ok(library) => Some(library),
            Err(err) => {
                debug!(library = *name, %err, "cannot open EGL library");
                None
            }
        })
    }

    unsafe fn call(library: &Library, symbol: &[u8]) -> Option<usize> {
        let getter: Symbol<GetCurrent> = library.get(symbol).ok()?;
        let handle = getter();
        (!handle.is_null()).then_some(handle as usize)
    }

    /// EGL_NO_CONTEXT and EGL_NO_DISPLAY are both null, so a null result means
    /// no EGL context is current on this thread.
    pub(super) unsafe fn current_handles() -> Option<GlShareHandles> {
        let library = open()?;
        Some(GlShareHandles {
            window_system: WindowSystem::Egl,
            context: call(&library, b"eglGetCurrentContext\0")?,
            display: call(&library, b"eglGetCurrentDisplay\0")?,
            share_group: 0,
        })
    }
}
