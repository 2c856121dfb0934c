//! Which API currently owns the memory behind a shared buffer.

use std::fmt;

use crate::error::InteropError;

/// Owner of a GL buffer that is also registered with the compute API.
///
/// Exactly one domain owns the memory at any time. Compute kernels may only
/// write it while `ComputeOwned`; GL may only draw from it while
/// `GraphicsOwned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    #[default]
    GraphicsOwned,
    ComputeOwned,
}

impl Ownership {
    /// Fail unless the memory is currently owned by `expected`.
    pub fn require(self, expected: Ownership) -> Result<(), InteropError> {
        if self == expected {
            Ok(())
        } else {
            Err(InteropError::OwnershipViolation {
                expected,
                found: self,
            })
        }
    }

    /// The state after handing the memory to the other domain.
    pub fn handed_over(self) -> Ownership {
        match self {
            Self::GraphicsOwned => Self::ComputeOwned,
            Self::ComputeOwned => Self::GraphicsOwned,
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GraphicsOwned => f.write_str("graphics-owned"),
            Self::ComputeOwned => f.write_str("compute-owned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_graphics_owned() {
        assert_eq!(Ownership::default(), Ownership::GraphicsOwned);
    }

    #[test]
    fn expect_reports_mismatch() {
        assert!(Ownership::GraphicsOwned.require(Ownership::GraphicsOwned).is_ok());
        let err = Ownership::ComputeOwned
            .require(Ownership::GraphicsOwned)
            .unwrap_err();
        assert_eq!(
            err,
            InteropError::OwnershipViolation {
                expected: Ownership::GraphicsOwned,
                found: Ownership::ComputeOwned,
            }
        );
        assert_eq!(err.to_string(), "shared buffer is compute-owned, expected graphics-owned");
    }

    #[test]
    fn hand_over_alternates() {
        let o = Ownership::GraphicsOwned.handed_over();
        assert_eq!(o, Ownership::ComputeOwned);
        assert_eq!(o.handed_over(), Ownership::GraphicsOwned);
    }
}
