//! Finite field arithmetic
//!
//! GF(2^8) with its lookup tables, and GF(2^16) built as a quadratic extension of it.

pub mod gf256;
pub mod gf65536;
pub mod tables;

pub use gf256::Gf256Field;
pub use gf65536::{is_irreducible_delta, Gf65536Field, DEFAULT_DELTA};
pub use tables::{
    AffineTables, FieldParams, LogTables, ProductTable, AES_PRIMITIVE, AES_REDUCTION,
};
