//! Row FMA kernels: `x[i] ^= z * y[i]` over GF(2^8)
//!
//! Four bit-exact strategies share the [`ScaledRowAdd`] contract:
//!
//! - **Base**: scan the product-table row of `z`
//! - **ExternalSimd**: delegate to a vector library; [`NibbleKernel`] is the bundled
//!   split-nibble provider (PSHUFB on AVX2/SSSE3, scalar nibble tables otherwise)
//! - **AffineGeneral**: `GF2P8AFFINEQB` with the scalar's precomputed bit matrix
//! - **AffineDedicated**: `GF2P8MULB`, only valid for the 0x1B modulus
//!
//! The host queries [`Capabilities`] once, picks a [`StrategyKind`] and builds a
//! [`RowFma`]. Hardware variants refuse to build without the features they need, so
//! the hot loops never check the CPU again.

pub mod base;
pub mod gfni;
pub mod nibble;
#[cfg(target_arch = "x86_64")]
pub mod pshufb;

pub use base::{add_scaled_row_base, BaseKernel};
pub use gfni::{AffineKernel, DedicatedKernel};
pub use nibble::{build_nibble_tables, NibbleKernel, NibbleTables, SimdLevel};

use crate::error::{GfError, GfResult};
use crate::field::Gf256Field;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Scaled accumulate over GF(2^8) vectors.
///
/// Implementations perform `x[i] ^= z * y[i]` for `i < min(x.len(), y.len())` and
/// treat `z == 0` as a no-op. Any `Fn(&mut [u8], &[u8], u8)` satisfies the trait, so
/// an external library routine can be passed in directly.
pub trait ScaledRowAdd {
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8);
}

impl<F> ScaledRowAdd for F
where
    F: Fn(&mut [u8], &[u8], u8),
{
    #[inline]
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        self(x, y, z)
    }
}

/// Name of a row FMA strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    #[default]
    Base,
    ExternalSimd,
    AffineGeneral,
    AffineDedicated,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Base,
        StrategyKind::ExternalSimd,
        StrategyKind::AffineGeneral,
        StrategyKind::AffineDedicated,
    ];

    /// Stable name used on the command line
    pub const fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Base => "base",
            StrategyKind::ExternalSimd => "external-simd",
            StrategyKind::AffineGeneral => "affine-general",
            StrategyKind::AffineDedicated => "affine-dedicated",
        }
    }

    /// Label used in benchmark reports
    pub const fn bench_name(&self) -> &'static str {
        match self {
            StrategyKind::Base => "BinaryTable",
            StrategyKind::ExternalSimd => "LowHighSIMDTables",
            StrategyKind::AffineGeneral => "GFNIAffine",
            StrategyKind::AffineDedicated => "GFNIMul",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = GfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name || kind.bench_name().to_ascii_lowercase() == name)
            .ok_or_else(|| GfError::UnknownStrategy(s.to_string()))
    }
}

/// CPU features relevant to the row kernels.
///
/// Only obtainable through [`Capabilities::detect`] or [`Capabilities::none`], so a
/// reported feature is always really present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    ssse3: bool,
    avx2: bool,
    gfni: bool,
}

impl Capabilities {
    /// No SIMD at all
    pub const fn none() -> Self {
        Self {
            ssse3: false,
            avx2: false,
            gfni: false,
        }
    }

    /// Query the running CPU
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            let caps = Self {
                ssse3: is_x86_feature_detected!("ssse3"),
                avx2: is_x86_feature_detected!("avx2"),
                gfni: is_x86_feature_detected!("gfni"),
            };
            debug!("Detected CPU capabilities: {:?}", caps);
            return caps;
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            debug!("No x86_64 SIMD kernels on this architecture");
            Self::none()
        }
    }

    pub const fn ssse3(&self) -> bool {
        self.ssse3
    }

    pub const fn avx2(&self) -> bool {
        self.avx2
    }

    /// Both affine strategies need 256-bit GFNI
    pub const fn has_gfni_avx2(&self) -> bool {
        self.gfni && self.avx2
    }

    /// Whether `kind` can be built on this CPU, ignoring field parameters
    pub const fn supports(&self, kind: StrategyKind) -> bool {
        match kind {
            StrategyKind::Base | StrategyKind::ExternalSimd => true,
            StrategyKind::AffineGeneral | StrategyKind::AffineDedicated => self.has_gfni_avx2(),
        }
    }
}

/// A selected row FMA strategy, held for the session
#[derive(Clone, Copy)]
pub enum RowFma<'a> {
    Base(BaseKernel<'a>),
    ExternalSimd(&'a (dyn ScaledRowAdd + Sync)),
    AffineGeneral(AffineKernel<'a>),
    AffineDedicated(DedicatedKernel<'a>),
}

impl<'a> RowFma<'a> {
    pub fn base(field: &'a Gf256Field) -> Self {
        RowFma::Base(BaseKernel::new(field))
    }

    /// Wrap an external vector routine; its results are trusted as-is
    pub fn external(provider: &'a (dyn ScaledRowAdd + Sync)) -> Self {
        RowFma::ExternalSimd(provider)
    }

    pub fn affine_general(field: &'a Gf256Field, caps: Capabilities) -> GfResult<Self> {
        AffineKernel::new(field, caps).map(RowFma::AffineGeneral)
    }

    pub fn affine_dedicated(field: &'a Gf256Field, caps: Capabilities) -> GfResult<Self> {
        DedicatedKernel::new(field, caps).map(RowFma::AffineDedicated)
    }

    /// Build the strategy named by `kind`
    pub fn select(
        kind: StrategyKind,
        field: &'a Gf256Field,
        caps: Capabilities,
        external: &'a (dyn ScaledRowAdd + Sync),
    ) -> GfResult<Self> {
        let fma = match kind {
            StrategyKind::Base => Self::base(field),
            StrategyKind::ExternalSimd => Self::external(external),
            StrategyKind::AffineGeneral => Self::affine_general(field, caps)?,
            StrategyKind::AffineDedicated => Self::affine_dedicated(field, caps)?,
        };
        debug!("Selected {} row FMA strategy", kind);
        Ok(fma)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            RowFma::Base(_) => StrategyKind::Base,
            RowFma::ExternalSimd(_) => StrategyKind::ExternalSimd,
            RowFma::AffineGeneral(_) => StrategyKind::AffineGeneral,
            RowFma::AffineDedicated(_) => StrategyKind::AffineDedicated,
        }
    }
}

impl ScaledRowAdd for RowFma<'_> {
    #[inline]
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        match self {
            RowFma::Base(kernel) => kernel.add_scaled_row(x, y, z),
            RowFma::ExternalSimd(provider) => {
                if z != 0 {
                    provider.add_scaled_row(x, y, z)
                }
            }
            RowFma::AffineGeneral(kernel) => kernel.add_scaled_row(x, y, z),
            RowFma::AffineDedicated(kernel) => kernel.add_scaled_row(x, y, z),
        }
    }
}

impl fmt::Debug for RowFma<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RowFma").field(&self.kind()).finish()
    }
}
