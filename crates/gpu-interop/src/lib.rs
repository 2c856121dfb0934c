//! GL-to-compute buffer sharing.
//!
//! This crate defines the [`ComputeDriver`] / [`ComputeBackend`] traits, a
//! common interface for compute APIs that can write into GL buffer objects,
//! and [`InteropBuffer`], which tracks which API owns the shared memory.
//!
//! Context creation differs per platform family; see [`platform`] for the
//! strategies. The OpenCL implementation is in [`opencl`] (feature `opencl`).

pub mod compute;
pub mod error;
pub mod interop;
pub mod ownership;
pub mod platform;

pub use compute::{ComputeBackend, ComputeDriver, GlBufferId};
pub use error::{ErrorKind, InteropError};
pub use interop::{ComputeAccess, InteropBuffer};
pub use ownership::Ownership;
pub use platform::{
    default_strategy, pick_platform, ContextStrategy, GlShareHandles, PlatformInfo, PlatformPairedStrategy,
    ShareGroupStrategy, SharingProperty, SharingRequest, WindowSystem,
};

// Platform-specific implementations.

#[cfg(feature = "opencl")]
pub mod opencl;
