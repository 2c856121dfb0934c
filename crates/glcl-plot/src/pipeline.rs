//! The built kernel program.

use gpu_interop::{ComputeBackend, InteropError};
use tracing::error;

use crate::kernel::{KERNEL_NAME, KERNEL_SOURCE};

/// [`KERNEL_SOURCE`] built against a compute context. Built once, reused
/// every frame.
pub struct CompiledProgram<B: ComputeBackend> {
    program: B::Program,
    kernel: &'static str,
}

impl<B: ComputeBackend> CompiledProgram<B> {
    pub fn build(backend: &mut B) -> Result<Self, InteropError> {
        let program = backend.build_program(KERNEL_SOURCE).map_err(|err| {
            if let Some(log) = err.build_log() {
                error!("kernel build failed:\n{log}");
            }
            err
        })?;
        Ok(Self {
            program,
            kernel: KERNEL_NAME,
        })
    }

    pub fn kernel_name(&self) -> &'static str {
        self.kernel
    }

    pub fn program(&self) -> &B::Program {
        &self.program
    }
}
