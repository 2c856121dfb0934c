//! Common interface for compute APIs that can share buffers with GL.
//!
//! A [`ComputeDriver`] enumerates platforms and creates a context sharing the
//! current GL context. The resulting [`ComputeBackend`] owns that context and
//! its in-order command queue. The OpenCL implementation lives in
//! [`crate::opencl`] behind the `opencl` feature.

use gl::types::GLuint;
use glcl_core::Point;

use crate::error::InteropError;
use crate::platform::{PlatformInfo, SharingRequest};

/// GL name of a buffer object.
pub type GlBufferId = GLuint;

/// Entry point of a compute API: platform discovery and context creation.
pub trait ComputeDriver {
    type Backend: ComputeBackend;

    /// All platforms installed on this machine, in driver order.
    fn platforms(&self) -> Result<Vec<PlatformInfo>, InteropError>;

    /// Create a context and command queue sharing the current GL context.
    ///
    /// Fails with [`InteropError::DeviceUnavailable`] if no device can be
    /// bound to the shared context.
    fn create_shared_context(&self, request: &SharingRequest)
        -> Result<Self::Backend, InteropError>;
}

/// A compute context with one in-order command queue.
///
/// All `enqueue_*` calls are asynchronous with respect to the host; only
/// [`finish`](ComputeBackend::finish) blocks.
pub trait ComputeBackend {
    /// Read-only device buffer of points.
    type Buffer;
    /// Compute-side view of a GL buffer object.
    type SharedBuffer;
    /// Built program.
    type Program;

    /// Human-readable platform and device names, for logging.
    fn describe(&self) -> String;

    /// Upload `points` into a new read-only buffer.
    fn create_read_only_buffer(&mut self, points: &[Point]) -> Result<Self::Buffer, InteropError>;

    /// Register an existing GL buffer of `len` points for read-write access.
    fn register_gl_buffer(
        &mut self,
        gl_buffer: GlBufferId,
        len: usize,
    ) -> Result<Self::SharedBuffer, InteropError>;

    /// Build `source`. Failures carry the compiler log in
    /// [`InteropError::KernelCompile`].
    fn build_program(&mut self, source: &str) -> Result<Self::Program, InteropError>;

    /// Hand the shared buffer's memory to the compute API.
    fn enqueue_acquire(&mut self, shared: &Self::SharedBuffer) -> Result<(), InteropError>;

    /// Hand the shared buffer's memory back to GL.
    fn enqueue_release(&mut self, shared: &Self::SharedBuffer) -> Result<(), InteropError>;

    /// Run `kernel` over a 1-D range of `global_size` work items with
    /// `(input, output)` as its arguments.
    fn enqueue_kernel(
        &mut self,
        program: &Self::Program,
        kernel: &str,
        global_size: usize,
        input: &Self::Buffer,
        output: &Self::SharedBuffer,
    ) -> Result<(), InteropError>;

    /// Block until every queued command has completed.
    fn finish(&mut self) -> Result<(), InteropError>;
}
