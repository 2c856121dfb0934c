//! GL error checks around raw buffer operations.

use anyhow::{bail, Result};
use gl::types::GLenum;

use crate::loader;

/// Discard any errors left in the GL error queue.
pub fn clear_gl_errors() {
    loader::load_gl();
    unsafe { while gl::GetError() != gl::NO_ERROR {} }
}

/// Fail with the first error in the GL error queue, draining the rest.
pub fn check_gl(label: &str) -> Result<()> {
    loader::load_gl();
    let mut first: Option<GLenum> = None;
    unsafe {
        loop {
            let err = gl::GetError();
            if err == gl::NO_ERROR {
                break;
            }
            first.get_or_insert(err);
        }
    }
    match first {
        Some(code) => bail!("{label}: {} (0x{code:04X})", error_name(code)),
        None => Ok(()),
    }
}

fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
mod tests {
    use super::error_name;

    #[test]
    fn names_common_errors() {
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0x1234), "unknown GL error");
    }
}
