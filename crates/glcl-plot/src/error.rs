use gpu_interop::{ErrorKind, InteropError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("paint requested before graphics initialization")]
    NotInitialized,

    #[error("graphics already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Interop(#[from] InteropError),

    #[error("graphics backend error: {0:#}")]
    Graphics(anyhow::Error),
}

impl From<anyhow::Error> for WidgetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Graphics(err)
    }
}

impl WidgetError {
    /// Classification of compute-side failures.
    pub fn interop_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Interop(err) => Some(err.kind()),
            _ => None,
        }
    }
}
