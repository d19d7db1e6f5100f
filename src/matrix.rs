//! Row-major matrix multiplication over GF(2^8)
//!
//! Matrices are caller-owned flat buffers described by a [`MatrixShape`]; the engine
//! never allocates. The product is accumulated row by row with whatever
//! [`ScaledRowAdd`] strategy the caller passes in:
//!
//! ```text
//! for i in rows:
//!     for k in inner:
//!         result[i, :] ^= left[i, k] * right[k, :]
//! ```
//!
//! The i-k-j order streams through `right` and `result` rows contiguously.

use crate::error::{GfError, GfResult};
use crate::field::Gf256Field;
use crate::kernels::ScaledRowAdd;

/// Dimensions of `left (rows × inner) · right (inner × cols)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixShape {
    pub rows: usize,
    pub inner: usize,
    pub cols: usize,
}

impl MatrixShape {
    pub const fn new(rows: usize, inner: usize, cols: usize) -> Self {
        Self { rows, inner, cols }
    }

    /// Square `n × n` times `n × n`
    pub const fn square(n: usize) -> Self {
        Self::new(n, n, n)
    }

    fn area(&self, a: usize, b: usize) -> GfResult<usize> {
        a.checked_mul(b).ok_or(GfError::ShapeOverflow {
            rows: self.rows,
            inner: self.inner,
            cols: self.cols,
        })
    }

    /// Elements in `left`
    pub fn left_len(&self) -> GfResult<usize> {
        self.area(self.rows, self.inner)
    }

    /// Elements in `right`
    pub fn right_len(&self) -> GfResult<usize> {
        self.area(self.inner, self.cols)
    }

    /// Elements in `result`
    pub fn result_len(&self) -> GfResult<usize> {
        self.area(self.rows, self.cols)
    }

    /// Check that all three buffers have exactly the sizes this shape implies
    pub fn validate(&self, left: &[u8], right: &[u8], result: &[u8]) -> GfResult<()> {
        check_len("left", self.left_len()?, left.len())?;
        check_len("right", self.right_len()?, right.len())?;
        check_len("result", self.result_len()?, result.len())
    }
}

fn check_len(operand: &'static str, expected: usize, actual: usize) -> GfResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GfError::DimensionMismatch {
            operand,
            expected,
            actual,
        })
    }
}

/// `result = left · right` using `fma` for every row update
///
/// `result` is overwritten; its previous contents do not matter.
///
/// # Errors
/// [`GfError::DimensionMismatch`] or [`GfError::ShapeOverflow`] when the buffers do
/// not match `shape`. Nothing is written in that case.
pub fn mat_mul<K>(
    left: &[u8],
    right: &[u8],
    shape: MatrixShape,
    fma: &K,
    result: &mut [u8],
) -> GfResult<()>
where
    K: ScaledRowAdd + ?Sized,
{
    shape.validate(left, right, result)?;
    result.fill(0);

    let MatrixShape { inner, cols, .. } = shape;
    if inner == 0 || cols == 0 {
        return Ok(());
    }

    for (out_row, left_row) in result.chunks_exact_mut(cols).zip(left.chunks_exact(inner)) {
        for (&coeff, right_row) in left_row.iter().zip(right.chunks_exact(cols)) {
            fma.add_scaled_row(out_row, right_row, coeff);
        }
    }

    Ok(())
}

/// Direct definition `result[i, j] = Σ_k left[i, k] · right[k, j]` with canonical multiply
pub fn mat_mul_reference(
    field: &Gf256Field,
    left: &[u8],
    right: &[u8],
    shape: MatrixShape,
    result: &mut [u8],
) -> GfResult<()> {
    shape.validate(left, right, result)?;
    let MatrixShape { rows, inner, cols } = shape;

    for i in 0..rows {
        for j in 0..cols {
            result[i * cols + j] = (0..inner).fold(0u8, |acc, k| {
                field.add(acc, field.mul(left[i * inner + k], right[k * cols + j]))
            });
        }
    }

    Ok(())
}
