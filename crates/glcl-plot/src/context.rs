//! Compute context wrapping the GL-sharing compute backend.
//!
//! Created once, on the first graphics-initialization callback, with the
//! host's GL context already current.

use gpu_interop::{ComputeBackend, ComputeDriver, ContextStrategy, GlShareHandles, InteropError};
use tracing::{debug, info};

pub struct ComputeContext<B> {
    backend: B,
    strategy: &'static str,
}

impl<B: ComputeBackend> ComputeContext<B> {
    /// Enumerate platforms, let `strategy` choose the sharing properties and
    /// create the shared context and command queue.
    pub fn initialize<D>(
        driver: &D,
        strategy: &dyn ContextStrategy,
        handles: Option<&GlShareHandles>,
    ) -> Result<Self, InteropError>
    where
        D: ComputeDriver<Backend = B>,
    {
        let platforms = driver.platforms()?;
        debug!(
            count = platforms.len(),
            strategy = strategy.name(),
            "enumerated compute platforms"
        );

        let request = strategy.sharing_request(&platforms, handles)?;
        let backend = driver.create_shared_context(&request)?;
        info!(
            strategy = strategy.name(),
            compute = %backend.describe(),
            "compute context ready"
        );

        Ok(Self {
            backend,
            strategy: strategy.name(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Name of the strategy that created this context.
    pub fn strategy(&self) -> &'static str {
        self.strategy
    }
}
