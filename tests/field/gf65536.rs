//! GF(2^16) as x^2 + x + 0x20 over GF(2^8)

use gfkern::field::{is_irreducible_delta, DEFAULT_DELTA};
use gfkern::{FieldParams, GfError, Gf256Field, Gf65536Field};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn distributivity_on_random_triples() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100_000 {
        let x: u16 = rng.random();
        let y: u16 = rng.random();
        let z: u16 = rng.random();
        assert_eq!(
            field.mul(z, field.add(x, y)),
            field.add(field.mul(z, x), field.mul(z, y)),
            "x={x:#06x} y={y:#06x} z={z:#06x}"
        );
    }
}

#[test]
fn every_nonzero_element_has_an_inverse() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    for x in 1..=u16::MAX {
        assert_eq!(field.mul(x, field.inv(x)), Gf65536Field::ONE, "x={x:#06x}");
    }
    assert_eq!(field.inv(0), Gf65536Field::ZERO);
}

#[test]
fn itoh_tsujii_agrees_with_exponentiation() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    for x in 0..=u16::MAX {
        assert_eq!(field.inv(x), field.inv_itoh_tsujii(x), "x={x:#06x}");
    }
}

#[test]
fn norm_lies_in_base_field() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    for x in 1..=u16::MAX {
        assert_eq!(field.pow(x, 257) >> 8, 0, "x={x:#06x}");
    }
}

#[test]
fn group_order_is_65535() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    for x in [1u16, 2, 0x0100, 0x1234, 0xFFFF] {
        assert_eq!(field.pow(x, 65535), 1);
        assert_eq!(field.pow(x, 0), 1);
    }
}

#[test]
fn division_by_zero_is_an_error() {
    let field = Gf65536Field::new(Gf256Field::shared()).unwrap();
    assert_eq!(
        field.div(0x1234, 0),
        Err(GfError::DivisionByZero { field: "GF(2^16)" })
    );
    assert_eq!(field.div(0, 0x1234), Ok(0));
    let q = field.div(0x1234, 0xABCD).unwrap();
    assert_eq!(field.mul(q, 0xABCD), 0x1234);
}

#[test]
fn reducible_delta_is_rejected() {
    let base = Gf256Field::shared();
    assert!(is_irreducible_delta(base, DEFAULT_DELTA));

    // delta = r^2 + r has r as a root
    let r = 7u8;
    let delta = base.add(base.mul(r, r), r);
    assert!(!is_irreducible_delta(base, delta));
    assert_eq!(
        Gf65536Field::with_delta(base, delta).unwrap_err(),
        GfError::ReducibleExtension { delta }
    );
}

#[test]
fn default_delta_needs_checking_over_other_moduli() {
    // x^8 + x^6 + x^5 + x^3 + 1 is a valid base field, but x^2 + x + 0x20 splits over it
    let base = Gf256Field::with_params(FieldParams::new(0x69, 2)).unwrap();
    assert!(!is_irreducible_delta(&base, DEFAULT_DELTA));
    assert_eq!(
        Gf65536Field::new(&base).unwrap_err(),
        GfError::ReducibleExtension {
            delta: DEFAULT_DELTA
        }
    );
}
