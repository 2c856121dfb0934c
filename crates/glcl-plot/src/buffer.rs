//! [`BufferPair`]: the GL vertex buffer, the read-only compute input and the
//! interop handle binding them.

use glcl_core::InputDataset;
use gpu_interop::{ComputeBackend, InteropBuffer};
use tracing::debug;

use crate::context::ComputeContext;
use crate::error::WidgetError;
use crate::graphics::GraphicsBackend;
use crate::pipeline::CompiledProgram;

pub struct BufferPair<V, B: ComputeBackend> {
    render: V,
    compute: B::Buffer,
    interop: InteropBuffer<B>,
    count: usize,
}

impl<V, B: ComputeBackend> BufferPair<V, B> {
    /// Allocate both buffers for `dataset`, register the vertex buffer with the
    /// compute context and build the kernel.
    ///
    /// Drains the command queue before returning so every upload has landed.
    pub fn setup<G>(
        graphics: &mut G,
        compute: &mut ComputeContext<B>,
        dataset: &InputDataset,
    ) -> Result<(Self, CompiledProgram<B>), WidgetError>
    where
        G: GraphicsBackend<VertexBuffer = V>,
    {
        let count = dataset.len();

        let render = graphics.create_vertex_buffer(count)?;
        let gl_buffer = graphics.vertex_buffer_id(&render);
        // The buffer must exist on the GPU before the compute API can see it.
        graphics.finish();
        debug!(gl_buffer, count, bytes = dataset.byte_len(), "created vertex buffer");

        let backend = compute.backend_mut();
        let input = backend.create_read_only_buffer(dataset.points())?;
        let interop = InteropBuffer::register(backend, gl_buffer, count)?;
        let program = CompiledProgram::build(backend)?;
        backend.finish()?;

        Ok((
            Self {
                render,
                compute: input,
                interop,
                count,
            },
            program,
        ))
    }

    pub fn render(&self) -> &V {
        &self.render
    }

    pub fn interop(&self) -> &InteropBuffer<B> {
        &self.interop
    }

    /// Number of points in each buffer.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Split borrow for the frame updater.
    pub(crate) fn parts_mut(&mut self) -> (&B::Buffer, &mut InteropBuffer<B>) {
        (&self.compute, &mut self.interop)
    }
}
