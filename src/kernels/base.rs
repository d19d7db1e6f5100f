//! Table-scan row FMA, the reference every other kernel is compared against

use super::ScaledRowAdd;
use crate::field::{Gf256Field, ProductTable};

/// `x[i] ^= products[z][y[i]]` over the common prefix of `x` and `y`
///
/// Also serves as the tail loop of the vector kernels.
#[inline]
pub fn add_scaled_row_base(products: &ProductTable, x: &mut [u8], y: &[u8], z: u8) {
    if z == 0 {
        return;
    }
    let row = products.row(z);
    for (xi, &yi) in x.iter_mut().zip(y) {
        *xi ^= row[yi as usize];
    }
}

/// Base strategy: one product-table lookup per element
#[derive(Debug, Clone, Copy)]
pub struct BaseKernel<'a> {
    products: &'a ProductTable,
}

impl<'a> BaseKernel<'a> {
    pub fn new(field: &'a Gf256Field) -> Self {
        Self {
            products: field.products(),
        }
    }
}

impl ScaledRowAdd for BaseKernel<'_> {
    #[inline]
    fn add_scaled_row(&self, x: &mut [u8], y: &[u8], z: u8) {
        add_scaled_row_base(self.products, x, y, z);
    }
}
