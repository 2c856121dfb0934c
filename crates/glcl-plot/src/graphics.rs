//! The [`GraphicsBackend`] trait: everything the widget needs from GL.

use anyhow::Result;
use glcl_core::{Projection, Viewport};
use gpu_interop::{GlBufferId, GlShareHandles};

/// Colors used when painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub clear_color: [f32; 4],
    pub line_color: [f32; 3],
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            line_color: [1.0, 1.0, 0.0],
        }
    }
}

/// GL side of the plot. All calls happen with the host's GL context current.
pub trait GraphicsBackend {
    /// Vertex buffer of `[f32; 2]` points.
    type VertexBuffer;

    /// Native handles of the current GL context, or `None` if none is current.
    fn share_handles(&self) -> Option<GlShareHandles>;

    /// Allocate a zero-filled vertex buffer of `count` points with a
    /// dynamic-draw usage hint.
    fn create_vertex_buffer(&mut self, count: usize) -> Result<Self::VertexBuffer>;

    /// GL name of `buffer`, for registration with the compute API.
    fn vertex_buffer_id(&self, buffer: &Self::VertexBuffer) -> GlBufferId;

    fn set_clear_color(&mut self, rgba: [f32; 4]);

    /// Update the viewport and projection used by subsequent draws.
    fn set_viewport(&mut self, viewport: Viewport, projection: &Projection) -> Result<()>;

    /// Block until all submitted GL commands have completed (`glFinish`).
    fn finish(&mut self);

    /// Submit pending GL commands without waiting (`glFlush`).
    fn flush(&mut self);

    /// Clear, then draw the first `count` points of `buffer` as a line strip.
    fn draw_line_strip(
        &mut self,
        buffer: &Self::VertexBuffer,
        count: usize,
        color: [f32; 3],
    ) -> Result<()>;
}
