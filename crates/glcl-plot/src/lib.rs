//! GL/CL interop core for the sine plot.
//!
//! This crate ties together [`glcl_core`] (dataset, projection) and
//! [`gpu_interop`] (compute backends, shared-buffer ownership) into a widget
//! driven by three host callbacks.
//!
//! # Overview
//!
//! - [`ComputeContext`] creates the GL-sharing compute context once.
//! - [`BufferPair`] allocates the vertex buffer, the read-only input buffer
//!   and the interop handle between them.
//! - [`CompiledProgram`] is the built [`kernel`].
//! - [`FrameUpdater`] runs the acquire / dispatch / release / drain sequence.
//! - [`GraphicsBackend`] is the trait the windowing side implements.
//! - [`PlotWidget`] reacts to `on_graphics_init`, `on_paint` and `on_resize`.

pub mod buffer;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod graphics;
pub mod kernel;
pub mod pipeline;
pub mod widget;

// Re-export primary types at crate root for convenience.
pub use buffer::BufferPair;
pub use context::ComputeContext;
pub use dispatch::FrameUpdater;
pub use error::WidgetError;
pub use graphics::{DrawStyle, GraphicsBackend};
pub use pipeline::CompiledProgram;
pub use widget::{Lifecycle, PlotWidget};
