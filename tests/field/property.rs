//! Property-based tests for field arithmetic

use gfkern::{Gf256Field, Gf65536Field};
use proptest::prelude::*;

proptest! {
    /// Property: GF(2^8) multiplication is commutative
    #[test]
    fn prop_gf256_mul_commutative(a in any::<u8>(), b in any::<u8>()) {
        let field = Gf256Field::shared();
        prop_assert_eq!(field.mul(a, b), field.mul(b, a));
    }

    /// Property: GF(2^8) multiplication is associative
    #[test]
    fn prop_gf256_mul_associative(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
        let field = Gf256Field::shared();
        prop_assert_eq!(field.mul(field.mul(a, b), c), field.mul(a, field.mul(b, c)));
    }

    /// Property: a^m * a^n = a^(m+n) for signed exponents
    #[test]
    fn prop_gf256_pow_adds_exponents(a in 1u8..=255, m in -1000i32..1000, n in -1000i32..1000) {
        let field = Gf256Field::shared();
        prop_assert_eq!(field.mul(field.pow(a, m), field.pow(a, n)), field.pow(a, m + n));
    }

    /// Property: GF(2^16) multiplication is commutative
    #[test]
    fn prop_gf65536_mul_commutative(a in any::<u16>(), b in any::<u16>()) {
        let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
        prop_assert_eq!(field.mul(a, b), field.mul(b, a));
    }

    /// Property: GF(2^16) multiplication is associative
    #[test]
    fn prop_gf65536_mul_associative(a in any::<u16>(), b in any::<u16>(), c in any::<u16>()) {
        let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
        prop_assert_eq!(field.mul(field.mul(a, b), c), field.mul(a, field.mul(b, c)));
    }

    /// Property: (a / b) * b = a for nonzero b
    #[test]
    fn prop_gf65536_division_round_trip(a in any::<u16>(), b in 1u16..=u16::MAX) {
        let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
        let q = field.div(a, b).unwrap();
        prop_assert_eq!(field.mul(q, b), a);
    }

    /// Property: elements with zero high byte multiply like GF(2^8)
    #[test]
    fn prop_subfield_embedding(a in any::<u8>(), b in any::<u8>()) {
        let base = Gf256Field::shared();
        let field = Gf65536Field::new(base).unwrap();
        prop_assert_eq!(field.mul(a as u16, b as u16), base.mul(a, b) as u16);
    }
}
