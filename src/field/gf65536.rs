//! Galois Field GF(2^16) as a quadratic extension of GF(2^8)
//!
//! An element `a` is the pair `(a0, a1)` = `a0 + a1·x` with `a0` in the low byte and
//! `a1` in the high byte, where `x² + x + δ = 0` for the GF(2^8) constant δ = 0x20.
//! All arithmetic is expressed through the borrowed [`Gf256Field`]; this module owns
//! no tables.
//!
//! Two inversions are provided. [`Gf65536Field::inv`] raises to the power 65534 with
//! 15 squarings. [`Gf65536Field::inv_itoh_tsujii`] maps the problem to a single
//! GF(2^8) inversion after 8 squarings, using that `a^257` is the norm of `a` and
//! therefore lies in the subfield.

use super::gf256::Gf256Field;
use crate::error::{GfError, GfResult};

/// δ in x² + x + δ; has no root in GF(2^8) under the AES modulus
pub const DEFAULT_DELTA: u8 = 0x20;

#[inline(always)]
fn split(a: u16) -> (u8, u8) {
    (a as u8, (a >> 8) as u8)
}

#[inline(always)]
fn join(low: u8, high: u8) -> u16 {
    low as u16 | (high as u16) << 8
}

/// Whether x² + x + δ has no root in `base`, i.e. the extension is a field
pub fn is_irreducible_delta(base: &Gf256Field, delta: u8) -> bool {
    (0..=255u8).all(|x| base.add(base.add(base.mul(x, x), x), delta) != Gf256Field::ZERO)
}

/// GF(2^16) context borrowing its GF(2^8) base field
#[derive(Debug, Clone, Copy)]
pub struct Gf65536Field<'a> {
    base: &'a Gf256Field,
    delta: u8,
}

impl<'a> Gf65536Field<'a> {
    /// Additive identity
    pub const ZERO: u16 = 0;
    /// Multiplicative identity
    pub const ONE: u16 = 1;

    /// Extension with δ = 0x20
    ///
    /// # Errors
    /// [`GfError::ReducibleExtension`] when x² + x + 0x20 has a root in `base`. Never
    /// happens for the AES base field, but some alternative moduli do have one.
    pub fn new(base: &'a Gf256Field) -> GfResult<Self> {
        Self::with_delta(base, DEFAULT_DELTA)
    }

    /// Extension with a caller-chosen δ, rejecting reducible polynomials
    pub fn with_delta(base: &'a Gf256Field, delta: u8) -> GfResult<Self> {
        if !is_irreducible_delta(base, delta) {
            return Err(GfError::ReducibleExtension { delta });
        }
        Ok(Self { base, delta })
    }

    #[inline]
    pub fn base(&self) -> &'a Gf256Field {
        self.base
    }

    #[inline]
    pub fn delta(&self) -> u8 {
        self.delta
    }

    #[inline(always)]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    #[inline(always)]
    pub fn sub(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// (a0 + a1x)(b0 + b1x) with x² = x + δ
    #[inline]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        let gf = self.base;
        let (a0, a1) = split(a);
        let (b0, b1) = split(b);

        let t = gf.mul_table(a1, b1);
        let low = gf.add(gf.mul_table(a0, b0), gf.mul_table(t, self.delta));
        let high = gf.add(gf.add(gf.mul_table(a0, b1), gf.mul_table(a1, b0)), t);
        join(low, high)
    }

    #[inline]
    fn square(&self, a: u16) -> u16 {
        self.mul(a, a)
    }

    /// Inverse as `a^65534`; `inv(0)` is 0
    pub fn inv(&self, a: u16) -> u16 {
        let mut result = Self::ONE;
        let mut square = self.square(a);
        for _ in 1..16 {
            result = self.mul(result, square);
            square = self.square(square);
        }
        result
    }

    /// Itoh-Tsujii inverse; agrees with [`Self::inv`] everywhere
    pub fn inv_itoh_tsujii(&self, a: u16) -> u16 {
        let mut a_r = a;
        for _ in 0..8 {
            a_r = self.square(a_r);
        }
        let (norm, high) = split(self.mul(a_r, a));
        debug_assert_eq!(high, 0, "a^257 must lie in GF(2^8)");
        self.mul(a_r, self.base.inv(norm) as u16)
    }

    /// Division `a / b`
    ///
    /// # Errors
    /// [`GfError::DivisionByZero`] when `b` is zero.
    pub fn div(&self, a: u16, b: u16) -> GfResult<u16> {
        if b == 0 {
            return Err(GfError::DivisionByZero { field: "GF(2^16)" });
        }
        Ok(self.mul(a, self.inv_itoh_tsujii(b)))
    }

    /// Square-and-multiply power; `pow(0, 0)` is 1
    pub fn pow(&self, mut a: u16, mut n: u64) -> u16 {
        let mut result = Self::ONE;
        while n != 0 {
            if n & 1 == 1 {
                result = self.mul(result, a);
            }
            a = self.square(a);
            n >>= 1;
        }
        result
    }
}
