//! PSHUFB-based GF(2^8) multiply-add
//!
//! ### Algorithm Overview
//!
//! **Key insight**: PSHUFB performs 16-entry (4-bit) lookups in every lane. A GF(2^8)
//! product needs a 256-entry table, so each source byte is split into two nibbles,
//! each nibble is looked up in its own 16-byte table, and the two results are XORed.
//!
//! Per vector:
//! 1. `lo = src & 0x0F`, `hi = (src >> 4) & 0x0F`
//! 2. `product = shuffle(low_table, lo) ^ shuffle(high_table, hi)`
//! 3. `dst ^= product`
//!
//! Both functions handle the largest whole-vector prefix and return its length; the
//! caller finishes the remainder with scalar lookups.

use super::nibble::NibbleTables;
use std::arch::x86_64::*;

/// AVX2 PSHUFB multiply-add, 32 bytes per iteration
///
/// # Safety
/// - Requires AVX2 and SSSE3 CPU support. Caller must ensure CPU has these features before calling.
/// - Only the first `min(x.len(), y.len())` bytes are considered; unaligned loads/stores are used.
#[target_feature(enable = "avx2", enable = "ssse3")]
pub unsafe fn add_scaled_row_pshufb_avx2(x: &mut [u8], y: &[u8], tables: &NibbleTables) -> usize {
    let len = x.len().min(y.len());
    let end = len - len % 32;

    // Broadcast the 128-bit tables to both lanes
    let low_table =
        _mm256_broadcastsi128_si256(_mm_loadu_si128(tables.low.as_ptr() as *const __m128i));
    let high_table =
        _mm256_broadcastsi128_si256(_mm_loadu_si128(tables.high.as_ptr() as *const __m128i));
    let mask_0x0f = _mm256_set1_epi8(0x0F);

    let mut pos = 0;
    while pos < end {
        let src = _mm256_loadu_si256(y.as_ptr().add(pos) as *const __m256i);
        let dst = _mm256_loadu_si256(x.as_ptr().add(pos) as *const __m256i);

        let lo_nib = _mm256_and_si256(src, mask_0x0f);
        // 16-bit shift leaks bits across bytes; the mask removes them
        let hi_nib = _mm256_and_si256(_mm256_srli_epi16(src, 4), mask_0x0f);

        let product = _mm256_xor_si256(
            _mm256_shuffle_epi8(low_table, lo_nib),
            _mm256_shuffle_epi8(high_table, hi_nib),
        );

        _mm256_storeu_si256(
            x.as_mut_ptr().add(pos) as *mut __m256i,
            _mm256_xor_si256(dst, product),
        );
        pos += 32;
    }

    end
}

/// SSSE3 PSHUFB multiply-add, 16 bytes per iteration
///
/// # Safety
/// - Requires SSSE3 CPU support. Caller must ensure CPU has this feature before calling.
/// - Only the first `min(x.len(), y.len())` bytes are considered; unaligned loads/stores are used.
#[target_feature(enable = "ssse3")]
pub unsafe fn add_scaled_row_pshufb_ssse3(x: &mut [u8], y: &[u8], tables: &NibbleTables) -> usize {
    let len = x.len().min(y.len());
    let end = len - len % 16;

    let low_table = _mm_loadu_si128(tables.low.as_ptr() as *const __m128i);
    let high_table = _mm_loadu_si128(tables.high.as_ptr() as *const __m128i);
    let mask_0x0f = _mm_set1_epi8(0x0F);

    let mut pos = 0;
    while pos < end {
        let src = _mm_loadu_si128(y.as_ptr().add(pos) as *const __m128i);
        let dst = _mm_loadu_si128(x.as_ptr().add(pos) as *const __m128i);

        let lo_nib = _mm_and_si128(src, mask_0x0f);
        let hi_nib = _mm_and_si128(_mm_srli_epi16(src, 4), mask_0x0f);

        let product = _mm_xor_si128(
            _mm_shuffle_epi8(low_table, lo_nib),
            _mm_shuffle_epi8(high_table, hi_nib),
        );

        _mm_storeu_si128(
            x.as_mut_ptr().add(pos) as *mut __m128i,
            _mm_xor_si128(dst, product),
        );
        pos += 16;
    }

    end
}
