//! Error types for field construction, division and kernel selection

use crate::kernels::StrategyKind;
use thiserror::Error;

/// Errors reported by field contexts, row kernels and the matrix engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GfError {
    /// Divisor was the zero element
    #[error("Division by zero in {field}")]
    DivisionByZero { field: &'static str },

    /// Primitive element does not generate all 255 nonzero elements
    #[error(
        "Element {primitive:#04x} does not generate GF(2^8)* under reduction byte {reduction:#04x}"
    )]
    NotPrimitive { reduction: u8, primitive: u8 },

    /// x^2 + x + delta has a root in GF(2^8), so the extension is not a field
    #[error("x^2 + x + {delta:#04x} is reducible over GF(2^8)")]
    ReducibleExtension { delta: u8 },

    /// Strategy needs CPU features the capability query did not report
    #[error("{strategy} strategy needs {missing}, which this CPU does not provide")]
    UnsupportedStrategy {
        strategy: StrategyKind,
        missing: &'static str,
    },

    /// Hardware GF multiply only implements the 0x1B modulus
    #[error("{strategy} strategy requires reduction byte 0x1b, field uses {reduction:#04x}")]
    ModulusMismatch {
        strategy: StrategyKind,
        reduction: u8,
    },

    /// Matrix buffer length does not match the declared shape
    #[error("{operand} buffer holds {actual} elements, shape requires {expected}")]
    DimensionMismatch {
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Declared shape does not fit in usize
    #[error("Matrix shape {rows}x{inner}x{cols} overflows usize")]
    ShapeOverflow {
        rows: usize,
        inner: usize,
        cols: usize,
    },

    /// Strategy name could not be parsed
    #[error("Unknown row FMA strategy {0:?}")]
    UnknownStrategy(String),
}

/// Type alias for results carrying [`GfError`]
pub type GfResult<T> = Result<T, GfError>;
