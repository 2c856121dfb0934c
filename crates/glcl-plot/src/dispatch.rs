//! Per-frame kernel execution.

use gpu_interop::{ComputeBackend, InteropError};
use tracing::trace;

use crate::buffer::BufferPair;
use crate::context::ComputeContext;
use crate::pipeline::CompiledProgram;

/// Runs the kernel into the shared vertex buffer, one pass per frame.
#[derive(Debug, Default)]
pub struct FrameUpdater {
    frames: u64,
}

impl FrameUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed passes so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Acquire the vertex buffer, dispatch the kernel over every point,
    /// release the buffer back to GL and drain the queue.
    ///
    /// If the dispatch fails the buffer is still released before the error is
    /// returned.
    pub fn run<V, B: ComputeBackend>(
        &mut self,
        compute: &mut ComputeContext<B>,
        buffers: &mut BufferPair<V, B>,
        program: &CompiledProgram<B>,
    ) -> Result<(), InteropError> {
        let count = buffers.len();
        let (input, interop) = buffers.parts_mut();

        let mut access = interop.acquire(compute.backend_mut())?;
        let dispatched = access.dispatch(program.program(), program.kernel_name(), count, input);
        let released = access.release();
        dispatched?;
        released?;

        compute.backend_mut().finish()?;

        self.frames = self.frames.wrapping_add(1);
        trace!(frame = self.frames, count, "frame updated");
        Ok(())
    }
}
