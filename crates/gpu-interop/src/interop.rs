//! [`InteropBuffer`]: a GL buffer registered with the compute API, with
//! explicit ownership tracking.
//!
//! Compute access is only available through a [`ComputeAccess`] guard, which
//! holds the buffer mutably borrowed for as long as the compute domain owns
//! the memory. Dropping the guard without calling
//! [`release`](ComputeAccess::release) still hands the memory back.

use tracing::{debug, error, trace};

use crate::compute::{ComputeBackend, GlBufferId};
use crate::error::InteropError;
use crate::ownership::Ownership;

pub struct InteropBuffer<B: ComputeBackend> {
    shared: B::SharedBuffer,
    gl_buffer: GlBufferId,
    len: usize,
    ownership: Ownership,
}

impl<B: ComputeBackend> InteropBuffer<B> {
    /// Register `gl_buffer` (holding `len` points) with the compute backend.
    /// The memory starts out graphics-owned.
    pub fn register(backend: &mut B, gl_buffer: GlBufferId, len: usize) -> Result<Self, InteropError> {
        let shared = backend.register_gl_buffer(gl_buffer, len)?;
        debug!(gl_buffer, len, "registered GL buffer for compute access");
        Ok(Self {
            shared,
            gl_buffer,
            len,
            ownership: Ownership::GraphicsOwned,
        })
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn gl_buffer(&self) -> GlBufferId {
        self.gl_buffer
    }

    /// Number of points in the shared buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fail unless GL may read the buffer right now.
    pub fn ensure_graphics_owned(&self) -> Result<(), InteropError> {
        self.ownership.require(Ownership::GraphicsOwned)
    }

    /// Move the memory into the compute domain.
    ///
    /// Fails with [`InteropError::OwnershipViolation`] if compute already owns
    /// it (a previous release failed), or with the backend's error if the
    /// driver rejects the transfer.
    pub fn acquire<'a>(&'a mut self, backend: &'a mut B) -> Result<ComputeAccess<'a, B>, InteropError> {
        self.ensure_graphics_owned()?;
        backend.enqueue_acquire(&self.shared)?;
        self.ownership = Ownership::ComputeOwned;
        trace!(gl_buffer = self.gl_buffer, "acquired for compute");
        Ok(ComputeAccess {
            buffer: self,
            backend,
            released: false,
        })
    }
}

/// Compute-domain access to an [`InteropBuffer`].
pub struct ComputeAccess<'a, B: ComputeBackend> {
    buffer: &'a mut InteropBuffer<B>,
    backend: &'a mut B,
    released: bool,
}

impl<'a, B: ComputeBackend> ComputeAccess<'a, B> {
    /// Run `kernel` with `input` and the shared buffer as arguments.
    pub fn dispatch(
        &mut self,
        program: &B::Program,
        kernel: &str,
        global_size: usize,
        input: &B::Buffer,
    ) -> Result<(), InteropError> {
        self.backend
            .enqueue_kernel(program, kernel, global_size, input, &self.buffer.shared)
    }

    /// Hand the memory back to GL.
    ///
    /// On failure the buffer stays compute-owned and GL must not draw from it.
    pub fn release(mut self) -> Result<(), InteropError> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<(), InteropError> {
        self.released = true;
        self.backend
            .enqueue_release(&self.buffer.shared)
            .map_err(|err| match err {
                InteropError::InteropRelease(_) => err,
                other => InteropError::InteropRelease(other.to_string()),
            })?;
        self.buffer.ownership = Ownership::GraphicsOwned;
        trace!(gl_buffer = self.buffer.gl_buffer, "released to graphics");
        Ok(())
    }
}

impl<B: ComputeBackend> Drop for ComputeAccess<'_, B> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(err) = self.release_inner() {
                error!("implicit release of shared buffer failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glcl_core::Point;

    /// Records the order of queued commands; release can be made to fail.
    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        fail_release: bool,
    }

    impl ComputeBackend for Recorder {
        type Buffer = ();
        type SharedBuffer = GlBufferId;
        type Program = ();

        fn describe(&self) -> String {
            "recorder".into()
        }

        fn create_read_only_buffer(&mut self, _points: &[Point]) -> Result<(), InteropError> {
            Ok(())
        }

        fn register_gl_buffer(&mut self, gl_buffer: GlBufferId, _len: usize) -> Result<GlBufferId, InteropError> {
            Ok(gl_buffer)
        }

        fn build_program(&mut self, _source: &str) -> Result<(), InteropError> {
            Ok(())
        }

        fn enqueue_acquire(&mut self, _shared: &GlBufferId) -> Result<(), InteropError> {
            self.log.push("acquire");
            Ok(())
        }

        fn enqueue_release(&mut self, _shared: &GlBufferId) -> Result<(), InteropError> {
            self.log.push("release");
            if self.fail_release {
                Err(InteropError::Driver("CL_INVALID_GL_OBJECT".into()))
            } else {
                Ok(())
            }
        }

        fn enqueue_kernel(
            &mut self,
            _program: &(),
            _kernel: &str,
            _global_size: usize,
            _input: &(),
            _output: &GlBufferId,
        ) -> Result<(), InteropError> {
            self.log.push("kernel");
            Ok(())
        }

        fn finish(&mut self) -> Result<(), InteropError> {
            Ok(())
        }
    }

    #[test]
    fn acquire_dispatch_release() {
        let mut backend = Recorder::default();
        let mut buffer = InteropBuffer::register(&mut backend, 3, 16).unwrap();

        let mut access = buffer.acquire(&mut backend).unwrap();
        access.dispatch(&(), "k", 16, &()).unwrap();
        access.release().unwrap();

        assert_eq!(buffer.ownership(), Ownership::GraphicsOwned);
        assert_eq!(backend.log, vec!["acquire", "kernel", "release"]);
    }

    #[test]
    fn compute_owned_while_guard_alive() {
        let mut backend = Recorder::default();
        let mut buffer = InteropBuffer::register(&mut backend, 3, 16).unwrap();
        {
            let access = buffer.acquire(&mut backend).unwrap();
            assert_eq!(access.buffer.ownership, Ownership::ComputeOwned);
            assert!(access.buffer.ensure_graphics_owned().is_err());
        }
        // Dropped guard released implicitly.
        assert_eq!(buffer.ownership(), Ownership::GraphicsOwned);
        assert_eq!(backend.log, vec!["acquire", "release"]);
    }

    #[test]
    fn failed_release_blocks_graphics_and_reacquire() {
        let mut backend = Recorder {
            fail_release: true,
            ..Recorder::default()
        };
        let mut buffer = InteropBuffer::register(&mut backend, 3, 16).unwrap();

        let access = buffer.acquire(&mut backend).unwrap();
        let err = access.release().unwrap_err();
        assert!(matches!(err, InteropError::InteropRelease(_)));

        assert_eq!(buffer.ownership(), Ownership::ComputeOwned);
        assert!(buffer.ensure_graphics_owned().is_err());
        assert!(matches!(
            buffer.acquire(&mut backend).err(),
            Some(InteropError::OwnershipViolation { .. })
        ));
    }
}
