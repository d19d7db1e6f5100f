//! Galois Field GF(2^8) arithmetic
//!
//! ## Field Representation
//!
//! Elements are bytes interpreted as polynomials over GF(2) of degree < 8, reduced
//! modulo x⁸ + x⁴ + x³ + x + 1 (reduction byte 0x1B, the AES/GFNI modulus). The
//! multiplicative group has order 255 and is generated by 3 (x + 1).
//!
//! ## Multiplication Algorithms
//!
//! Three interchangeable multiplications are provided and must agree bit for bit:
//!
//! - [`Gf256Field::mul`]: canonical shift-and-reduce, needs no tables
//! - [`Gf256Field::mul_table`]: exp/log lookup
//! - [`Gf256Field::mul_affine`]: scalar emulation of the affine-transform instruction
//!
//! ## Field Context
//!
//! All lookup state lives in a [`Gf256Field`] value. A context can only be obtained
//! fully built, so lookup-based operations can never observe uninitialised tables.

use super::tables::{
    affine_byte, mul_poly, AffineTables, FieldParams, LogTables, ProductTable, GROUP_ORDER,
};
use crate::error::{GfError, GfResult};
use log::debug;
use std::sync::OnceLock;

/// GF(2^8) context owning the exp/log, product and affine tables
#[derive(Debug, Clone)]
pub struct Gf256Field {
    params: FieldParams,
    logs: LogTables,
    products: ProductTable,
    affine: AffineTables,
}

impl Default for Gf256Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Gf256Field {
    /// Additive identity
    pub const ZERO: u8 = 0;
    /// Multiplicative identity
    pub const ONE: u8 = 1;

    /// Build every table family for the AES parameters
    pub fn new() -> Self {
        Self::build(FieldParams::AES)
    }

    /// Build a context for alternative parameters, rejecting non-primitive generators
    pub fn with_params(params: FieldParams) -> GfResult<Self> {
        params.validate()?;
        Ok(Self::build(params))
    }

    /// Process-wide AES context, built on first use
    pub fn shared() -> &'static Gf256Field {
        static FIELD: OnceLock<Gf256Field> = OnceLock::new();
        FIELD.get_or_init(Gf256Field::new)
    }

    fn build(params: FieldParams) -> Self {
        debug!(
            "Building GF(2^8) tables: reduction {:#04x}, primitive {:#04x}",
            params.reduction, params.primitive
        );
        Self {
            params,
            logs: LogTables::new(params),
            products: ProductTable::new(params),
            affine: AffineTables::new(params),
        }
    }

    #[inline]
    pub fn params(&self) -> FieldParams {
        self.params
    }

    #[inline]
    pub fn logs(&self) -> &LogTables {
        &self.logs
    }

    #[inline]
    pub fn products(&self) -> &ProductTable {
        &self.products
    }

    #[inline]
    pub fn affine(&self) -> &AffineTables {
        &self.affine
    }

    /// Addition is XOR
    #[inline(always)]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Subtraction coincides with addition in characteristic 2
    #[inline(always)]
    pub fn sub(&self, a: u8, b: u8) -> u8 {
        self.add(a, b)
    }

    /// Canonical multiplication, the reference for all other algorithms
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        mul_poly(a, b, self.params.reduction)
    }

    /// Multiplication through the exp/log tables
    #[inline]
    pub fn mul_table(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = self.logs.log[a as usize] as usize + self.logs.log[b as usize] as usize;
        // Subtracts 255 when sum > 255
        self.logs.exp[(sum & 255) + (sum >> 8)]
    }

    /// Multiplication by selecting byte slices of `b`'s bit matrix, one per set bit of `a`
    #[inline]
    pub fn mul_affine(&self, a: u8, b: u8) -> u8 {
        let columns = self.affine.columns[b as usize];
        (0..8).fold(0u8, |acc, bit| {
            let slice = (columns >> (8 * bit)) as u8;
            acc ^ (((a >> bit) & 1) * slice)
        })
    }

    /// Apply `b`'s hardware-layout matrix to `a` the way one GFNI lane would
    #[inline]
    pub fn affine_apply(&self, a: u8, b: u8) -> u8 {
        affine_byte(self.affine.hardware[b as usize], a)
    }

    /// Division `a / b`
    ///
    /// # Errors
    /// [`GfError::DivisionByZero`] when `b` is zero, including `0 / 0`.
    pub fn div(&self, a: u8, b: u8) -> GfResult<u8> {
        if b == 0 {
            return Err(GfError::DivisionByZero { field: "GF(2^8)" });
        }
        if a == 0 {
            return Ok(0);
        }
        let mut diff = self.logs.log[a as usize] as i32 - self.logs.log[b as usize] as i32;
        if diff < 0 {
            diff += GROUP_ORDER as i32;
        }
        Ok(self.logs.exp[diff as usize])
    }

    /// Multiplicative inverse; `inv(0)` is 0 by convention
    #[inline]
    pub fn inv(&self, a: u8) -> u8 {
        if a == 0 {
            return 0;
        }
        self.logs.exp[GROUP_ORDER - self.logs.log[a as usize] as usize]
    }

    /// Power with a signed exponent.
    ///
    /// `0^0 = 1` and `0^n = 0` for any other `n`. A negative exponent raises the
    /// inverse of `a` to `|n|`.
    pub fn pow(&self, a: u8, n: i32) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }

        let base = if n < 0 { self.inv(a) } else { a };
        let exponent = n.unsigned_abs() as u64 % GROUP_ORDER as u64;
        let log = self.logs.log[base as usize] as u64;
        self.logs.exp[((log * exponent) % GROUP_ORDER as u64) as usize]
    }
}
