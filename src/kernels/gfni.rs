//! GFNI row FMA kernels
//!
//! Two formulations of the same product, both processing 64 bytes per iteration as
//! two 256-bit vectors:
//!
//! - [`AffineKernel`] broadcasts the scalar's bit matrix and applies
//!   `GF2P8AFFINEQB`. The matrix is precomputed for the field's own modulus, so any
//!   basis works.
//! - [`DedicatedKernel`] broadcasts the raw scalar and applies `GF2P8MULB`, whose
//!   modulus is fixed to x⁸ + x⁴ + x³ + x + 1 in silicon.
//!
//! Remainder bytes go through the product-table loop.

use super::base::add_scaled_row_base;
use super::{Capabilities, ScaledRowAdd, StrategyKind};
use crate::error::{GfError, GfResult};
use crate::field::Gf256Field;

/// Bytes consumed per vector iteration
pub const CHUNK: usize = 64;

fn require_gfni(strategy: StrategyKind, caps: Capabilities) -> GfResult<()> {
    if caps.has_gfni_avx2() {
        Ok(())
    } else {
        Err(GfError::UnsupportedStrategy {
            strategy,
            missing: "AVX2 and GFNI",
        })
    }
}

/// Affine-transform strategy, valid for any field parameters
#[derive(Debug, Clone, Copy)]
pub struct AffineKernel<'a> {
    field: &'a Gf256Field,
}

impl<'a> AffineKernel<'a> {
    pub fn new(field: &'a Gf256Field, caps: Capabilities) -> GfResult<Self> {
        require_gfni(StrategyKind::AffineGeneral, caps)?;
        Ok(Self { field })
    }
}

impl ScaledRowAdd for AffineKernel<'_> {
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        if z == 0 {
            return;
        }
        let len = x.len().min(y.len());
        let (x, y) = (&mut x[..len], &y[..len]);

        #[cfg(target_arch = "x86_64")]
        // SAFETY: construction checked AVX2 + GFNI
        let done = unsafe {
            x86::add_scaled_row_affine(x, y, self.field.affine().hardware[z as usize])
        };
        #[cfg(not(target_arch = "x86_64"))]
        let done = 0;

        add_scaled_row_base(self.field.products(), &mut x[done..], &y[done..], z);
    }
}

/// Dedicated GF(2^8) multiply strategy, only for the 0x1B modulus
#[derive(Debug, Clone, Copy)]
pub struct DedicatedKernel<'a> {
    field: &'a Gf256Field,
}

impl<'a> DedicatedKernel<'a> {
    /// Fails with [`GfError::ModulusMismatch`] before looking at the CPU when the
    /// field is not the AES field.
    pub fn new(field: &'a Gf256Field, caps: Capabilities) -> GfResult<Self> {
        let params = field.params();
        if !params.is_aes_modulus() {
            return Err(GfError::ModulusMismatch {
                strategy: StrategyKind::AffineDedicated,
                reduction: params.reduction,
            });
        }
        require_gfni(StrategyKind::AffineDedicated, caps)?;
        Ok(Self { field })
    }
}

impl ScaledRowAdd for DedicatedKernel<'_> {
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        if z == 0 {
            return;
        }
        let len = x.len().min(y.len());
        let (x, y) = (&mut x[..len], &y[..len]);

        #[cfg(target_arch = "x86_64")]
        // SAFETY: construction checked AVX2 + GFNI
        let done = unsafe { x86::add_scaled_row_gf2p8mul(x, y, z) };
        #[cfg(not(target_arch = "x86_64"))]
        let done = 0;

        add_scaled_row_base(self.field.products(), &mut x[done..], &y[done..], z);
    }
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::CHUNK;
    use std::arch::x86_64::*;

    /// `x ^= A·y` lane-wise for whole 64-byte chunks; returns bytes processed
    ///
    /// # Safety
    /// Caller must ensure AVX2 and GFNI are available.
    #[target_feature(enable = "avx2,gfni")]
    pub(super) unsafe fn add_scaled_row_affine(x: &mut [u8], y: &[u8], matrix: u64) -> usize {
        let chunks = x.len().min(y.len()) / CHUNK;
        let matrix_v = _mm256_set1_epi64x(matrix as i64);

        for i in 0..chunks {
            let offset = i * CHUNK;
            let s0 = _mm256_loadu_si256(y.as_ptr().add(offset).cast());
            let s1 = _mm256_loadu_si256(y.as_ptr().add(offset + 32).cast());
            let d0 = _mm256_loadu_si256(x.as_ptr().add(offset).cast());
            let d1 = _mm256_loadu_si256(x.as_ptr().add(offset + 32).cast());

            let p0 = _mm256_gf2p8affine_epi64_epi8::<0>(s0, matrix_v);
            let p1 = _mm256_gf2p8affine_epi64_epi8::<0>(s1, matrix_v);

            _mm256_storeu_si256(x.as_mut_ptr().add(offset).cast(), _mm256_xor_si256(d0, p0));
            _mm256_storeu_si256(
                x.as_mut_ptr().add(offset + 32).cast(),
                _mm256_xor_si256(d1, p1),
            );
        }

        chunks * CHUNK
    }

    /// `x ^= z·y` with the hardware GF(2^8) multiply for whole 64-byte chunks
    ///
    /// # Safety
    /// Caller must ensure AVX2 and GFNI are available.
    #[target_feature(enable = "avx2,gfni")]
    pub(super) unsafe fn add_scaled_row_gf2p8mul(x: &mut [u8], y: &[u8], z: u8) -> usize {
        let chunks = x.len().min(y.len()) / CHUNK;
        let coeff_v = _mm256_set1_epi8(z as i8);

        for i in 0..chunks {
            let offset = i * CHUNK;
            let s0 = _mm256_loadu_si256(y.as_ptr().add(offset).cast());
            let s1 = _mm256_loadu_si256(y.as_ptr().add(offset + 32).cast());
            let d0 = _mm256_loadu_si256(x.as_ptr().add(offset).cast());
            let d1 = _mm256_loadu_si256(x.as_ptr().add(offset + 32).cast());

            let p0 = _mm256_gf2p8mul_epi8(coeff_v, s0);
            let p1 = _mm256_gf2p8mul_epi8(coeff_v, s1);

            _mm256_storeu_si256(x.as_mut_ptr().add(offset).cast(), _mm256_xor_si256(d0, p0));
            _mm256_storeu_si256(
                x.as_mut_ptr().add(offset + 32).cast(),
                _mm256_xor_si256(d1, p1),
            );
        }

        chunks * CHUNK
    }
}
