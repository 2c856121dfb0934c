//! Sine plot demo.
//!
//! Opens a window, builds the GL/CL interop widget over a dataset of x values
//! evenly spaced in [-1, 1] and lets OpenCL compute the curve straight into
//! the GL vertex buffer. The window repaints only when the window system asks.
//!
//! Configuration comes from `GLCL_*` environment variables (see
//! [`glcl_core::config`]); logging from `RUST_LOG`.

use anyhow::{Context, Result};
use glcl_core::{logging, InputDataset, PlotConfig};
use glcl_glium::GliumGraphics;
use glcl_plot::{DrawStyle, PlotWidget};
use glium::backend::glutin::SimpleWindowBuilder;
use glium::winit::dpi::PhysicalPosition;
use glium::winit::event::{Event, WindowEvent};
use glium::winit::event_loop::EventLoop;
use gpu_interop::opencl::OclDriver;
use tracing::{error, info};

fn main() -> Result<()> {
    logging::init();

    let config = PlotConfig::from_env().context("reading configuration")?;
    let dataset = InputDataset::linspace(config.point_count)?;
    info!(points = dataset.len(), window = ?config.window, "starting sine plot");

    let event_loop = EventLoop::builder()
        .build()
        .context("creating event loop")?;
    let (window, display) = SimpleWindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(config.window.width, config.window.height)
        .build(&event_loop);
    window.set_outer_position(PhysicalPosition::new(config.window.x, config.window.y));

    let graphics = GliumGraphics::new(display)?;
    let strategy = gpu_interop::default_strategy(config.platform_index, config.device_index);
    let mut widget = PlotWidget::new(graphics, OclDriver, strategy, dataset).with_style(DrawStyle {
        clear_color: config.clear_color,
        line_color: config.line_color,
    });

    widget
        .on_graphics_init()
        .context("initializing GL/CL interop")?;
    let size = window.inner_size();
    widget.on_resize(size.width, size.height)?;

    let mut failure: Option<anyhow::Error> = None;

    #[allow(deprecated)]
    event_loop
        .run(|event, window_target| {
            let Event::WindowEvent { event, .. } = event else {
                return;
            };
            let result = match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                    Ok(())
                }
                WindowEvent::Resized(size) => widget.on_resize(size.width, size.height),
                WindowEvent::RedrawRequested => widget.on_paint(),
                _ => Ok(()),
            };
            if let Err(err) = result {
                error!("{err}");
                failure = Some(err.into());
                window_target.exit();
            }
        })
        .context("running event loop")?;

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
