//! Host-side building blocks for the GL/CL sine plot.
//!
//! - [`inputs`] holds the immutable point dataset handed to the widget.
//! - [`projection`] maps data space to window pixels.
//! - [`config`] reads window geometry and dataset size from the environment.
//! - [`logging`] installs the `tracing` subscriber.

pub mod config;
pub mod inputs;
pub mod logging;
pub mod projection;

pub use config::{PlotConfig, WindowGeometry};
pub use inputs::{DatasetError, InputDataset, Point};
pub use projection::{Projection, Viewport};
