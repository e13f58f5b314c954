//! Error types for input that can be rejected before any engine runs.

use std::fmt;

/// Grid dimensions that cannot host the odd lattice carved by the stride-2 generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// A side is shorter than one room plus its two borders.
    TooSmall { side: &'static str, value: u16 },

    /// A side is larger than the supported maximum.
    TooLarge {
        side: &'static str,
        value: u16,
        max: u16,
    },

    /// A side is even, so the last row or column would never be carved.
    Even { side: &'static str, value: u16 },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionError::TooSmall { side, value } => {
                write!(f, "{} must be at least 3 (got {})", side, value)
            }
            DimensionError::TooLarge { side, value, max } => {
                write!(f, "{} must be at most {} (got {})", side, max, value)
            }
            DimensionError::Even { side, value } => {
                write!(f, "{} must be odd (got {})", side, value)
            }
        }
    }
}

impl std::error::Error for DimensionError {}
