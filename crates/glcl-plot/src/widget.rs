//! [`PlotWidget`]: the state machine behind the host's GL widget callbacks.
//!
//! The widget is `Uninitialized` until the host's first graphics-init
//! callback, which builds the compute context, buffers and kernel in one go.
//! If any step fails nothing is kept and the widget stays `Uninitialized`.

use glcl_core::{InputDataset, Projection, Viewport};
use gpu_interop::{ComputeBackend, ComputeDriver, ContextStrategy, Ownership};
use tracing::{debug, info};

use crate::buffer::BufferPair;
use crate::context::ComputeContext;
use crate::dispatch::FrameUpdater;
use crate::error::WidgetError;
use crate::graphics::{DrawStyle, GraphicsBackend};
use crate::pipeline::CompiledProgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
}

/// GPU resources created by `on_graphics_init`. Field order is drop order:
/// buffers and program go before the context that owns them.
struct Resources<V, B: ComputeBackend> {
    buffers: BufferPair<V, B>,
    program: CompiledProgram<B>,
    compute: ComputeContext<B>,
}

enum Stage<V, B: ComputeBackend> {
    Uninitialized,
    Ready(Box<Resources<V, B>>),
}

pub struct PlotWidget<G: GraphicsBackend, D: ComputeDriver> {
    graphics: G,
    driver: D,
    strategy: Box<dyn ContextStrategy>,
    dataset: InputDataset,
    style: DrawStyle,
    viewport: Viewport,
    projection: Projection,
    updater: FrameUpdater,
    stage: Stage<G::VertexBuffer, D::Backend>,
}

impl<G: GraphicsBackend, D: ComputeDriver> PlotWidget<G, D> {
    pub fn new(
        graphics: G,
        driver: D,
        strategy: Box<dyn ContextStrategy>,
        dataset: InputDataset,
    ) -> Self {
        Self {
            graphics,
            driver,
            strategy,
            dataset,
            style: DrawStyle::default(),
            viewport: Viewport::default(),
            projection: Projection::unit_square(),
            updater: FrameUpdater::new(),
            stage: Stage::Uninitialized,
        }
    }

    pub fn with_style(mut self, style: DrawStyle) -> Self {
        self.style = style;
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.stage {
            Stage::Uninitialized => Lifecycle::Uninitialized,
            Stage::Ready(_) => Lifecycle::Ready,
        }
    }

    pub fn dataset(&self) -> &InputDataset {
        &self.dataset
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    /// Completed frame updates, including the one run during init.
    pub fn frames(&self) -> u64 {
        self.updater.frames()
    }

    /// Buffer pair, once `Ready`.
    pub fn buffers(&self) -> Option<&BufferPair<G::VertexBuffer, D::Backend>> {
        match &self.stage {
            Stage::Ready(res) => Some(&res.buffers),
            Stage::Uninitialized => None,
        }
    }

    /// Current owner of the shared vertex memory, once `Ready`.
    pub fn ownership(&self) -> Option<Ownership> {
        self.buffers().map(|b| b.interop().ownership())
    }

    /// Host callback: the GL context exists and is current.
    ///
    /// Creates the compute context, the buffer pair and the kernel, runs one
    /// frame update and sets the clear color.
    pub fn on_graphics_init(&mut self) -> Result<(), WidgetError> {
        if let Stage::Ready(_) = self.stage {
            return Err(WidgetError::AlreadyInitialized);
        }

        let handles = self.graphics.share_handles();
        let mut compute =
            ComputeContext::initialize(&self.driver, self.strategy.as_ref(), handles.as_ref())?;
        let (mut buffers, program) =
            BufferPair::setup(&mut self.graphics, &mut compute, &self.dataset)?;

        self.graphics.finish();
        self.updater.run(&mut compute, &mut buffers, &program)?;
        self.graphics.flush();
        self.graphics.set_clear_color(self.style.clear_color);

        info!(
            points = buffers.len(),
            strategy = compute.strategy(),
            "plot widget ready"
        );
        self.stage = Stage::Ready(Box::new(Resources {
            buffers,
            program,
            compute,
        }));
        Ok(())
    }

    /// Host callback: repaint.
    ///
    /// Re-runs the frame update, then draws the vertex buffer as a line strip
    /// once the memory is back in the graphics domain.
    pub fn on_paint(&mut self) -> Result<(), WidgetError> {
        let Stage::Ready(res) = &mut self.stage else {
            return Err(WidgetError::NotInitialized);
        };

        self.graphics.finish();
        self.updater
            .run(&mut res.compute, &mut res.buffers, &res.program)?;
        self.graphics.flush();

        res.buffers.interop().ensure_graphics_owned()?;
        self.graphics.draw_line_strip(
            res.buffers.render(),
            res.buffers.len(),
            self.style.line_color,
        )?;
        Ok(())
    }

    /// Host callback: the surface was resized. Buffers are untouched.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<(), WidgetError> {
        self.viewport = Viewport::full(width, height);
        self.projection = Projection::unit_square();
        self.graphics.set_viewport(self.viewport, &self.projection)?;
        debug!(width, height, "viewport updated");
        Ok(())
    }
}
