//! glium implementation of [`GraphicsBackend`].
//!
//! [`GliumGraphics`] owns the window's glium display, a flat-colored line
//! program and the current viewport/projection. Vertex buffers are plain
//! glium `VertexBuffer`s whose GL names are handed to the compute side.
//!
//! ### Warning
//!
//! The compute API writes into vertex buffers behind glium's back. glium
//! never caches buffer contents, so this is safe as long as GL reads only
//! happen while the buffer is graphics-owned.

use std::fmt::{Debug, Formatter};

use anyhow::{anyhow, Context as _, Result};
use glcl_core::{Projection, Viewport};
use glcl_plot::GraphicsBackend;
use glium::backend::Facade;
use glium::glutin::surface::WindowSurface;
use glium::index::{NoIndices, PrimitiveType};
use glium::{implement_vertex, uniform, Display, DrawParameters, GlObject, Program, Rect, Surface};
use gpu_interop::{GlBufferId, GlShareHandles};
use tracing::debug;

mod loader;
pub mod glsl;
pub mod share;
pub mod validate_gl;

pub use loader::load_gl;

/// One point of the plot, matching the compute side's `float2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
}
implement_vertex!(Vertex, position);

/// The plot's GL side, rendering into a glutin window through glium.
pub struct GliumGraphics {
    display: Display<WindowSurface>,
    program: Program,
    clear_color: [f32; 4],
    viewport: Option<Rect>,
    projection: [[f32; 4]; 4],
}

impl Debug for GliumGraphics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GliumGraphics")
            .field("clear_color", &self.clear_color)
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl GliumGraphics {
    /// Compile the line program for `display`. The display's context must be
    /// current.
    pub fn new(display: Display<WindowSurface>) -> Result<Self> {
        load_gl();

        let ctx = display.get_context();
        debug!("OPENGL_VERSION {}", ctx.get_opengl_version_string());

        let version = glsl::best_glsl_version(&**ctx)
            .ok_or_else(|| anyhow!("no supported GLSL version in this context"))?;
        debug!(?version, "selected GLSL dialect");

        let (vertex, fragment) = version.line_shaders();
        let program = Program::from_source(&display, vertex, fragment, None)
            .context("compiling line program")?;

        Ok(Self {
            display,
            program,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            viewport: None,
            projection: Projection::unit_square().matrix(),
        })
    }

    pub fn display(&self) -> &Display<WindowSurface> {
        &self.display
    }
}

impl GraphicsBackend for GliumGraphics {
    type VertexBuffer = glium::VertexBuffer<Vertex>;

    fn share_handles(&self) -> Option<GlShareHandles> {
        share::current_share_handles()
    }

    fn create_vertex_buffer(&mut self, count: usize) -> Result<Self::VertexBuffer> {
        validate_gl::clear_gl_errors();
        let zeros = vec![Vertex::default(); count];
        let buffer = glium::VertexBuffer::dynamic(&self.display, &zeros)
            .context("creating vertex buffer")?;
        validate_gl::check_gl("creating vertex buffer")?;
        Ok(buffer)
    }

    fn vertex_buffer_id(&self, buffer: &Self::VertexBuffer) -> GlBufferId {
        buffer.get_id()
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        self.clear_color = rgba;
    }

    fn set_viewport(&mut self, viewport: Viewport, projection: &Projection) -> Result<()> {
        self.display.resize((viewport.width, viewport.height));
        self.viewport = Some(Rect {
            left: viewport.x.max(0) as u32,
            bottom: viewport.y.max(0) as u32,
            width: viewport.width,
            height: viewport.height,
        });
        self.projection = projection.matrix();
        Ok(())
    }

    fn finish(&mut self) {
        self.display.get_context().finish();
    }

    fn flush(&mut self) {
        self.display.get_context().flush();
    }

    fn draw_line_strip(
        &mut self,
        buffer: &Self::VertexBuffer,
        count: usize,
        color: [f32; 3],
    ) -> Result<()> {
        let vertices = buffer
            .slice(0..count)
            .ok_or_else(|| anyhow!("draw of {count} vertices overruns buffer of {}", buffer.len()))?;

        let uniforms = uniform! {
            projection: self.projection,
            color: color,
        };
        let params = DrawParameters {
            viewport: self.viewport,
            ..Default::default()
        };

        let [r, g, b, a] = self.clear_color;
        let mut target = self.display.draw();
        target.clear_color(r, g, b, a);
        let drawn = target.draw(
            vertices,
            NoIndices(PrimitiveType::LineStrip),
            &self.program,
            &uniforms,
            &params,
        );
        // A frame must always be finished, even after a failed draw.
        target.finish().context("presenting frame")?;
        drawn.context("drawing line strip")?;
        Ok(())
    }
}
