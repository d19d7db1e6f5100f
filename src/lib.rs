//! GF(2^8) and GF(2^16) arithmetic with interchangeable row FMA kernels
//!
//! The building blocks, leaves first:
//!
//! - [`field`]: lookup tables and the [`Gf256Field`] / [`Gf65536Field`] context objects
//! - [`kernels`]: the `x[i] ^= z * y[i]` primitive in four bit-exact strategies
//! - [`matrix`]: row-major matrix multiply written only in terms of that primitive
//!
//! ```
//! use gfkern::{mat_mul, Gf256Field, MatrixShape, RowFma};
//!
//! let field = Gf256Field::new();
//! let fma = RowFma::base(&field);
//! let mut result = [0u8; 4];
//! mat_mul(&[1, 0, 0, 1], &[0x57, 0x83, 1, 2], MatrixShape::square(2), &fma, &mut result)?;
//! assert_eq!(result, [0x57, 0x83, 1, 2]);
//! # Ok::<(), gfkern::GfError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod kernels;
pub mod matrix;

pub use config::KernelConfig;
pub use error::{GfError, GfResult};
pub use field::{FieldParams, Gf256Field, Gf65536Field};
pub use kernels::{Capabilities, NibbleKernel, RowFma, ScaledRowAdd, StrategyKind};
pub use matrix::{mat_mul, mat_mul_reference, MatrixShape};
