//! GF(2^8) exhaustive checks

use gfkern::field::tables::affine_byte;
use gfkern::{FieldParams, GfError, Gf256Field};

#[test]
fn distributivity_over_all_triples() {
    let field = Gf256Field::shared();
    for x in 0..=255u8 {
        for y in 0..=255u8 {
            let sum = field.add(x, y);
            for z in 0..=255u8 {
                assert_eq!(
                    field.mul(z, sum),
                    field.add(field.mul(z, x), field.mul(z, y)),
                    "x={x:#04x} y={y:#04x} z={z:#04x}"
                );
            }
        }
    }
}

#[test]
fn all_multiply_algorithms_agree() {
    let field = Gf256Field::shared();
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            let expected = field.mul(a, b);
            assert_eq!(field.mul_table(a, b), expected, "table {a:#04x}*{b:#04x}");
            assert_eq!(field.mul_affine(a, b), expected, "affine {a:#04x}*{b:#04x}");
            assert_eq!(field.affine_apply(a, b), expected, "hardware {a:#04x}*{b:#04x}");
            assert_eq!(field.products().get(a, b), expected, "product {a:#04x}*{b:#04x}");
        }
    }
}

#[test]
fn hardware_matrix_is_multiplication_by_scalar() {
    let field = Gf256Field::shared();
    for z in 0..=255u8 {
        let matrix = field.affine().hardware[z as usize];
        for y in 0..=255u8 {
            assert_eq!(affine_byte(matrix, y), field.mul(y, z));
        }
    }
}

#[test]
fn every_nonzero_element_has_an_inverse() {
    let field = Gf256Field::shared();
    for x in 1..=255u8 {
        assert_eq!(field.mul(x, field.inv(x)), Gf256Field::ONE, "x={x:#04x}");
    }
    assert_eq!(field.inv(0), Gf256Field::ZERO);
}

#[test]
fn division_inverts_multiplication() {
    let field = Gf256Field::shared();
    for a in 0..=255u8 {
        for b in 1..=255u8 {
            assert_eq!(field.div(field.mul(a, b), b), Ok(a));
        }
        assert_eq!(
            field.div(a, 0),
            Err(GfError::DivisionByZero { field: "GF(2^8)" })
        );
    }
}

#[test]
fn extension_polynomial_has_no_root() {
    let field = Gf256Field::shared();
    for x in 0..=255u8 {
        let value = field.add(field.add(field.mul(x, x), x), 0x20);
        assert_ne!(value, Gf256Field::ZERO, "x={x:#04x} is a root");
    }
}

#[test]
fn exp_table_wraps_to_one() {
    let field = Gf256Field::shared();
    let logs = field.logs();
    assert_eq!(logs.exp[0], 1);
    assert_eq!(logs.exp[255], 1);
    assert_eq!(logs.exp[1], 3);
    for v in 1..=255u8 {
        assert_eq!(logs.exp[logs.log[v as usize] as usize], v);
    }
}

#[test]
fn alternative_parameters() {
    // x^8 + x^4 + x^3 + x^2 + 1 with generator x
    let field = Gf256Field::with_params(FieldParams::new(0x1D, 2)).unwrap();
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            assert_eq!(field.mul_table(a, b), field.mul(a, b));
            assert_eq!(field.affine_apply(a, b), field.mul(a, b));
        }
    }
    assert_eq!(field.mul(0x80, 2), 0x1D);

    // x has order 51 under the AES modulus
    assert_eq!(
        Gf256Field::with_params(FieldParams::new(0x1B, 2)).unwrap_err(),
        GfError::NotPrimitive {
            reduction: 0x1B,
            primitive: 2
        }
    );
}

#[test]
fn known_literals() {
    let field = Gf256Field::new();
    assert_eq!(field.mul(0x57, 0x83), 0xC1);
    assert_eq!(field.mul(0x57, 0x13), 0xFE);
    assert_eq!(field.pow(3, 255), 1);
    assert_eq!(field.pow(0, 0), 1);
    assert_eq!(field.pow(0, 5), 0);
    assert_eq!(field.pow(0x57, -1), field.inv(0x57));
    for x in 0..=255u8 {
        assert_eq!(field.mul(0, x), 0);
        assert_eq!(field.add(x, x), 0);
    }
}

#[test]
fn pow_matches_repeated_multiplication() {
    let field = Gf256Field::shared();
    for a in [1u8, 2, 3, 0x57, 0x8E, 0xFF] {
        let inverse = field.inv(a);
        let mut expected = Gf256Field::ONE;
        let mut expected_negative = Gf256Field::ONE;
        for n in 0..600i32 {
            assert_eq!(field.pow(a, n), expected, "{a:#04x}^{n}");
            assert_eq!(field.pow(a, -n), expected_negative, "{a:#04x}^-{n}");
            expected = field.mul(expected, a);
            expected_negative = field.mul(expected_negative, inverse);
        }
    }
}
