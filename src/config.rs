//! Configuration for field construction and row FMA selection

use crate::error::GfResult;
use crate::field::{FieldParams, Gf256Field, AES_PRIMITIVE, AES_REDUCTION};
use crate::kernels::{Capabilities, RowFma, ScaledRowAdd, StrategyKind};

/// Which strategy to run, over which field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Row FMA strategy, chosen explicitly by the caller
    pub strategy: StrategyKind,
    /// Reduction byte and primitive element of GF(2^8)
    pub params: FieldParams,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Base,
            params: FieldParams::AES,
        }
    }
}

impl KernelConfig {
    pub fn new(strategy: StrategyKind, params: FieldParams) -> Self {
        Self { strategy, params }
    }

    /// Read `strategy`, `reduction` and `primitive` from parsed arguments
    ///
    /// `reduction` and `primitive` are expected to be registered with
    /// [`parse_byte`] as their value parser; absent values fall back to the AES field.
    pub fn from_args(matches: &clap::ArgMatches) -> GfResult<Self> {
        let strategy = match matches.get_one::<String>("strategy") {
            Some(name) => name.parse()?,
            None => StrategyKind::default(),
        };

        let reduction = matches
            .get_one::<u8>("reduction")
            .copied()
            .unwrap_or(AES_REDUCTION);
        let primitive = matches
            .get_one::<u8>("primitive")
            .copied()
            .unwrap_or(AES_PRIMITIVE);

        Ok(Self::new(strategy, FieldParams::new(reduction, primitive)))
    }

    /// Build the field context, validating the parameters
    pub fn build_field(&self) -> GfResult<Gf256Field> {
        Gf256Field::with_params(self.params)
    }

    /// Build the configured strategy over `field`
    pub fn select<'a>(
        &self,
        field: &'a Gf256Field,
        caps: Capabilities,
        external: &'a (dyn ScaledRowAdd + Sync),
    ) -> GfResult<RowFma<'a>> {
        RowFma::select(self.strategy, field, caps, external)
    }
}

/// Parse a byte given in decimal or with a `0x` prefix
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid byte value {s:?}: {e}"))
}
