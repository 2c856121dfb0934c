//! Error taxonomy for the compute side of GL/CL interop.

use thiserror::Error;

use crate::ownership::Ownership;

/// Broad class of an [`InteropError`]. None of them are retried; each aborts
/// widget initialization or the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No interop-capable platform, device or GL context.
    PlatformSelection,
    /// The kernel failed to build.
    KernelCompile,
    /// Ownership of shared memory could not be transferred.
    InteropAcquire,
    /// Any other driver failure (allocation, dispatch, queue drain).
    Driver,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteropError {
    #[error("no compute platform reports GL sharing support")]
    NoInteropCapablePlatform,

    #[error("platform index {index} out of range ({available} platforms available)")]
    InvalidPlatformIndex { index: usize, available: usize },

    #[error("no compute device can be bound to the shared context: {0}")]
    DeviceUnavailable(String),

    #[error("no current GL context to share with")]
    NoCurrentGlContext,

    #[error("kernel build failed:\n{log}")]
    KernelCompile { log: String },

    #[error("acquiring shared buffer failed: {0}")]
    InteropAcquire(String),

    #[error("releasing shared buffer failed: {0}")]
    InteropRelease(String),

    #[error("shared buffer is {found}, expected {expected}")]
    OwnershipViolation {
        expected: Ownership,
        found: Ownership,
    },

    #[error("compute driver error: {0}")]
    Driver(String),
}

impl InteropError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoInteropCapablePlatform
            | Self::InvalidPlatformIndex { .. }
            | Self::DeviceUnavailable(_)
            | Self::NoCurrentGlContext => ErrorKind::PlatformSelection,
            Self::KernelCompile { .. } => ErrorKind::KernelCompile,
            Self::InteropAcquire(_) | Self::InteropRelease(_) | Self::OwnershipViolation { .. } => {
                ErrorKind::InteropAcquire
            }
            Self::Driver(_) => ErrorKind::Driver,
        }
    }

    /// Compiler diagnostic text, for kernel build failures.
    pub fn build_log(&self) -> Option<&str> {
        match self {
            Self::KernelCompile { log } => Some(log),
            _ => None,
        }
    }
}
