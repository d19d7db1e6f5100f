//! Split-nibble GF(2^8) multiply-add, the bundled external SIMD provider
//!
//! Multiplication by a fixed `z` is linear, so `z * y = z * (y & 0x0F) ^ z * (y & 0xF0)`.
//! Two 16-entry tables per scalar cover both halves, which is exactly what a
//! byte-shuffle instruction can look up: PSHUFB on x86_64 does 16 (SSSE3) or 32 (AVX2)
//! lookups per instruction.
//!
//! Based on the "Screaming Fast Galois Field Arithmetic" technique from
//! James Plank's paper (http://web.eecs.utk.edu/~plank/plank/papers/FAST-2013-GF.html).
//!
//! The rest of the crate treats this module as an opaque vector library reached through
//! [`ScaledRowAdd`]; nothing outside it depends on its table layout.

use super::{Capabilities, ScaledRowAdd};
use crate::field::Gf256Field;
use log::debug;

/// Nibble lookup tables for one scalar
///
/// Total size: 32 bytes (vs 256 bytes for a full product-table row), small enough to
/// live in two vector registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NibbleTables {
    /// Low nibble (0x0N) → z * 0x0N
    pub low: [u8; 16],
    /// High nibble (0xN0) → z * 0xN0
    pub high: [u8; 16],
}

/// Build nibble tables from a 256-entry product row
pub fn build_nibble_tables(row: &[u8; 256]) -> NibbleTables {
    let mut tables = NibbleTables::default();
    for nib in 0..16 {
        tables.low[nib] = row[nib];
        tables.high[nib] = row[nib << 4];
    }
    tables
}

/// Vector width used by [`NibbleKernel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    /// Table lookups one byte at a time
    Scalar,
    /// x86_64 SSSE3 (128-bit PSHUFB)
    Ssse3,
    /// x86_64 AVX2 (256-bit PSHUFB)
    Avx2,
}

impl SimdLevel {
    /// Widest level the capabilities allow
    pub const fn from_capabilities(caps: Capabilities) -> Self {
        if caps.avx2() && caps.ssse3() {
            SimdLevel::Avx2
        } else if caps.ssse3() {
            SimdLevel::Ssse3
        } else {
            SimdLevel::Scalar
        }
    }
}

/// Scalar nibble-table multiply-add, also used for remainder bytes
#[inline]
pub fn add_scaled_row_nibble_scalar(x: &mut [u8], y: &[u8], tables: &NibbleTables) {
    for (xi, &yi) in x.iter_mut().zip(y) {
        *xi ^= tables.low[(yi & 0x0F) as usize] ^ tables.high[(yi >> 4) as usize];
    }
}

/// Split-nibble provider holding tables for all 256 scalars
pub struct NibbleKernel {
    tables: Box<[NibbleTables]>,
    level: SimdLevel,
}

impl NibbleKernel {
    /// Provider using the widest shuffle the capabilities report
    pub fn new(field: &Gf256Field, caps: Capabilities) -> Self {
        Self::build(field, SimdLevel::from_capabilities(caps))
    }

    /// Provider restricted to scalar lookups
    pub fn scalar(field: &Gf256Field) -> Self {
        Self::build(field, SimdLevel::Scalar)
    }

    fn build(field: &Gf256Field, level: SimdLevel) -> Self {
        let tables = (0..=255u8)
            .map(|z| build_nibble_tables(field.products().row(z)))
            .collect();
        debug!("Built split-nibble tables, level {:?}", level);
        Self { tables, level }
    }

    pub fn level(&self) -> SimdLevel {
        self.level
    }

    pub fn tables(&self, z: u8) -> &NibbleTables {
        &self.tables[z as usize]
    }

    /// Run the vector loop over the largest whole-vector prefix, returning its length
    #[inline]
    fn vector_prefix(&self, x: &mut [u8], y: &[u8], tables: &NibbleTables) -> usize {
        match self.level {
            SimdLevel::Scalar => 0,
            // SAFETY: the level was derived from detected capabilities
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx2 => unsafe { super::pshufb::add_scaled_row_pshufb_avx2(x, y, tables) },
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Ssse3 => unsafe { super::pshufb::add_scaled_row_pshufb_ssse3(x, y, tables) },
            #[cfg(not(target_arch = "x86_64"))]
            _ => 0,
        }
    }
}

impl std::fmt::Debug for NibbleKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NibbleKernel")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl ScaledRowAdd for NibbleKernel {
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        if z == 0 {
            return;
        }
        let len = x.len().min(y.len());
        let (x, y) = (&mut x[..len], &y[..len]);
        let tables = self.tables(z);

        let done = self.vector_prefix(x, y, tables);
        add_scaled_row_nibble_scalar(&mut x[done..], &y[done..], tables);
    }
}
