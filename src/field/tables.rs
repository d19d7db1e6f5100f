//! Lookup tables for GF(2^8) arithmetic
//!
//! Three independent table families, each built by its own constructor:
//!
//! - [`LogTables`]: discrete log / antilog over the primitive element
//! - [`ProductTable`]: full 256x256 product table scanned by the base row kernel
//! - [`AffineTables`]: per-scalar 8x8 bit matrices for affine-transform multiplication
//!
//! All of them are pure functions of [`FieldParams`] and immutable once built.

use crate::error::{GfError, GfResult};

/// Reduction byte of x^8 + x^4 + x^3 + x + 1, the AES/GFNI modulus
pub const AES_REDUCTION: u8 = 0x1B;

/// Smallest primitive element for [`AES_REDUCTION`] (x + 1)
pub const AES_PRIMITIVE: u8 = 3;

/// Order of the multiplicative group of GF(2^8)
pub const GROUP_ORDER: usize = 255;

/// Parameters selecting a concrete GF(2^8) representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldParams {
    /// Low byte of the degree-8 modulus; x^8 is implicit
    pub reduction: u8,
    /// Generator of the multiplicative group, base of the exp/log tables
    pub primitive: u8,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self::AES
    }
}

impl FieldParams {
    /// Standard AES parameters, required by the dedicated GFNI multiply
    pub const AES: Self = Self {
        reduction: AES_REDUCTION,
        primitive: AES_PRIMITIVE,
    };

    pub const fn new(reduction: u8, primitive: u8) -> Self {
        Self {
            reduction,
            primitive,
        }
    }

    /// Whether these parameters match the fixed hardware modulus
    pub const fn is_aes_modulus(&self) -> bool {
        self.reduction == AES_REDUCTION
    }

    /// Check that `primitive` has multiplicative order exactly 255.
    ///
    /// An element of order 255 can only exist when the modulus is irreducible,
    /// so this also certifies that the parameters describe a field.
    pub fn validate(&self) -> GfResult<()> {
        let mut x = 1u8;
        for step in 1..=GROUP_ORDER {
            x = mul_poly(x, self.primitive, self.reduction);
            if x == 0 || (x == 1 && step < GROUP_ORDER) {
                return Err(self.not_primitive());
            }
        }
        if x != 1 {
            return Err(self.not_primitive());
        }
        Ok(())
    }

    fn not_primitive(&self) -> GfError {
        GfError::NotPrimitive {
            reduction: self.reduction,
            primitive: self.primitive,
        }
    }
}

/// Multiply by x: shift left and reduce if the top bit fell out
#[inline(always)]
pub const fn xtime(b: u8, reduction: u8) -> u8 {
    (b << 1) ^ ((b >> 7) * reduction)
}

/// Canonical shift-and-reduce multiplication.
///
/// Every other multiply path in the crate must agree with this bit for bit.
#[inline]
pub const fn mul_poly(mut a: u8, mut b: u8, reduction: u8) -> u8 {
    let mut result = 0u8;
    while a != 0 {
        result ^= b * (a & 1);
        a >>= 1;
        b = xtime(b, reduction);
    }
    result
}

/// Exp/log tables over the primitive element
#[derive(Clone)]
pub struct LogTables {
    /// `exp[i] = primitive^i`; `exp[255]` repeats `exp[0]` so sums up to 508 need no modulo
    pub exp: [u8; 256],
    /// `log[v]` for nonzero v; `log[0]` is never read
    pub log: [u8; 256],
}

impl LogTables {
    pub fn new(params: FieldParams) -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x = 1u8;

        for (i, slot) in exp.iter_mut().take(GROUP_ORDER).enumerate() {
            *slot = x;
            log[x as usize] = i as u8;
            x = mul_poly(x, params.primitive, params.reduction);
        }
        exp[GROUP_ORDER] = 1;

        Self { exp, log }
    }
}

impl std::fmt::Debug for LogTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogTables").finish_non_exhaustive()
    }
}

/// Full 256x256 product table, one row per scalar
#[derive(Clone)]
pub struct ProductTable {
    rows: Box<[[u8; 256]]>,
}

impl ProductTable {
    pub fn new(params: FieldParams) -> Self {
        let mut rows = vec![[0u8; 256]; 256].into_boxed_slice();
        for (z, row) in rows.iter_mut().enumerate() {
            for (y, product) in row.iter_mut().enumerate() {
                *product = mul_poly(y as u8, z as u8, params.reduction);
            }
        }
        Self { rows }
    }

    /// Products of every element with `z`
    #[inline(always)]
    pub fn row(&self, z: u8) -> &[u8; 256] {
        &self.rows[z as usize]
    }

    #[inline(always)]
    pub fn get(&self, y: u8, z: u8) -> u8 {
        self.rows[z as usize][y as usize]
    }
}

impl std::fmt::Debug for ProductTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductTable").finish_non_exhaustive()
    }
}

/// Per-scalar bit matrices for multiplication as a GF(2)-linear map
///
/// `columns[y]` packs the images of the input basis bits: byte `i` is `y * x^i`.
/// `hardware[y]` is the same map laid out for `GF2P8AFFINEQB`, which computes
/// output bit `i` as the parity of `matrix.byte[7 - i] & input`.
#[derive(Clone)]
pub struct AffineTables {
    pub columns: [u64; 256],
    pub hardware: [u64; 256],
}

impl AffineTables {
    pub fn new(params: FieldParams) -> Self {
        let mut columns = [0u64; 256];
        let mut hardware = [0u64; 256];

        for y in 0..256usize {
            let mut row = y as u8;
            let mut packed = 0u64;
            for shift in (0..64).step_by(8) {
                packed |= (row as u64) << shift;
                row = xtime(row, params.reduction);
            }
            columns[y] = packed;
            hardware[y] = transpose_for_affine(packed);
        }

        Self { columns, hardware }
    }
}

impl std::fmt::Debug for AffineTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffineTables").finish_non_exhaustive()
    }
}

/// Convert a column-packed bit matrix into the `GF2P8AFFINEQB` layout
pub const fn transpose_for_affine(columns: u64) -> u64 {
    let mut matrix = 0u64;
    let mut out_bit = 0;
    while out_bit < 8 {
        let mut row = 0u8;
        let mut in_bit = 0;
        while in_bit < 8 {
            let column = (columns >> (8 * in_bit)) as u8;
            row |= ((column >> out_bit) & 1) << in_bit;
            in_bit += 1;
        }
        matrix |= (row as u64) << (8 * (7 - out_bit));
        out_bit += 1;
    }
    matrix
}

/// Scalar emulation of one lane of `GF2P8AFFINEQB` with a zero translation byte
#[inline]
pub const fn affine_byte(matrix: u64, x: u8) -> u8 {
    let mut result = 0u8;
    let mut bit = 0;
    while bit < 8 {
        let mask = (matrix >> (8 * (7 - bit))) as u8;
        result |= (((mask & x).count_ones() & 1) as u8) << bit;
        bit += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes_parameters_are_valid() {
        assert!(FieldParams::AES.validate().is_ok());
    }

    #[test]
    fn two_is_not_primitive_for_aes_modulus() {
        // 0x02 has order 51 under 0x11B
        let params = FieldParams::new(AES_REDUCTION, 2);
        assert_eq!(
            params.validate(),
            Err(GfError::NotPrimitive {
                reduction: 0x1b,
                primitive: 2
            })
        );
    }

    #[test]
    fn exp_table_wraps_to_one() {
        let logs = LogTables::new(FieldParams::AES);
        assert_eq!(logs.exp[0], 1);
        assert_eq!(logs.exp[255], 1);
        assert_eq!(logs.exp[1], AES_PRIMITIVE);
        for i in 0..255usize {
            assert_eq!(logs.log[logs.exp[i] as usize] as usize, i);
        }
    }

    #[test]
    fn xtime_reduces_top_bit() {
        assert_eq!(xtime(0x80, AES_REDUCTION), 0x1b);
        assert_eq!(xtime(0x57, AES_REDUCTION), 0xae);
        assert_eq!(xtime(0xae, AES_REDUCTION), 0x47);
    }

    #[test]
    fn affine_identity_matrix() {
        let tables = AffineTables::new(FieldParams::AES);
        // Multiplying by one is the identity map: 0x01, 0x02, ..., 0x80
        assert_eq!(tables.columns[1], 0x8040_2010_0804_0201);
        // Hardware layout of the identity is the well-known GFNI identity constant
        assert_eq!(tables.hardware[1], 0x0102_0408_1020_4080);
        assert_eq!(tables.columns[0], 0);
        assert_eq!(tables.hardware[0], 0);
    }

    #[test]
    fn product_table_row_matches_canonical() {
        let products = ProductTable::new(FieldParams::AES);
        for y in 0..=255u8 {
            assert_eq!(products.get(y, 0x83), mul_poly(y, 0x83, AES_REDUCTION));
        }
        assert_eq!(products.row(0).iter().copied().max(), Some(0));
    }
}
