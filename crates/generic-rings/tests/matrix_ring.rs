//! Matrix rings used as ordinary rings, including nesting.

use generic_rings::prelude::*;
use generic_rings::{MethodRegistry, Methods};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn zn(n: u64) -> GrCtx {
    GrCtx::new(Nmod::new(n).unwrap())
}

#[test]
fn test_nested_identity_and_product() {
    let m2 = matrix_ctx(&zn(3), 2);
    let m2m2 = matrix_ctx(&m2, 2);

    let mut one = m2m2.new_elem();
    let mut sq = m2m2.new_elem();
    assert!(m2m2.one(one.as_elem_mut()).is_success());
    assert!(m2m2.mul(sq.as_elem_mut(), one.as_elem(), one.as_elem()).is_success());
    assert_eq!(m2m2.is_one(sq.as_elem()), Truth::True);
    assert_eq!(m2m2.is_zero(sq.as_elem()), Truth::False);

    // -1 is the negated identity, whose square is the identity again.
    let mut neg = m2m2.new_elem();
    assert!(m2m2.set_si(neg.as_elem_mut(), -1).is_success());
    assert_eq!(m2m2.is_neg_one(neg.as_elem()), Truth::True);
    assert!(m2m2.mul(sq.as_elem_mut(), neg.as_elem(), neg.as_elem()).is_success());
    assert_eq!(m2m2.equal(sq.as_elem(), one.as_elem()), Truth::True);
}

#[test]
fn test_registry_shares_one_table_for_all_matrix_rings() {
    let registry = MethodRegistry::new();
    let z3 = GrCtx::with_registry(Nmod::new(3).unwrap(), &registry);
    let qq = GrCtx::with_registry(RationalField::new(), &registry);
    assert_eq!(registry.len(), 2);
    assert!(!registry.contains::<MatrixRing>());

    let a = GrCtx::with_registry(MatrixRing::new(z3.clone(), 2), &registry);
    let b = GrCtx::with_registry(MatrixRing::new(qq, 5), &registry);
    let nested = GrCtx::with_registry(MatrixRing::new(a.clone(), 3), &registry);
    assert_eq!(registry.len(), 3);
    assert!(registry.contains::<MatrixRing>());

    assert_eq!(a.methods().kind_name(), b.methods().kind_name());
    assert_eq!(a.methods().kind_name(), nested.methods().kind_name());
    assert_ne!(a.methods().kind_name(), z3.methods().kind_name());

    let mut x = nested.new_elem();
    assert!(nested.one(x.as_elem_mut()).is_success());
    assert_eq!(nested.is_one(x.as_elem()), Truth::True);
    assert_eq!(b.describe(), "Ring of 5 x 5 matrices over Rational field (fmpq)");
}

#[test]
fn test_empty_matrix_ring() {
    let m0 = matrix_ctx(&zn(5), 0);
    let mut x = m0.new_elem();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(m0.randtest(x.as_elem_mut(), &mut rng, &RandOptions::default()).is_success());
    assert_eq!(m0.is_zero(x.as_elem()), Truth::True);
    assert_eq!(m0.is_one(x.as_elem()), Truth::True);
    assert_eq!(m0.elem_to_string(x.as_elem()), "[]\n");
}

#[test]
fn test_randtest_is_reproducible() {
    let ring = matrix_ctx(&zn(1_000_003), 3);
    let opts = RandOptions::default();
    let mut x = ring.new_elem();
    let mut y = ring.new_elem();
    assert!(ring.randtest(x.as_elem_mut(), &mut StdRng::seed_from_u64(42), &opts).is_success());
    assert!(ring.randtest(y.as_elem_mut(), &mut StdRng::seed_from_u64(42), &opts).is_success());
    assert_eq!(ring.equal(x.as_elem(), y.as_elem()), Truth::True);
}

#[test]
fn test_ball_matrices_propagate_uncertainty() {
    let rr = GrCtx::new(BallRing::new());
    let ring = matrix_ctx(&rr, 2);
    let mut x = ring.new_elem();
    let opts = RandOptions::default().with_density(1.0);
    assert!(ring.randtest(x.as_elem_mut(), &mut StdRng::seed_from_u64(7), &opts).is_success());
    // Random balls are never exact, so even self-equality is undecided.
    assert_eq!(ring.equal(x.as_elem(), x.as_elem()), Truth::UNKNOWN);

    let mut one = ring.new_elem();
    assert!(ring.one(one.as_elem_mut()).is_success());
    assert_eq!(ring.is_one(one.as_elem()), Truth::True);
}

#[test]
fn test_print_format() {
    let ctx = GrCtx::new(RationalField::new());
    let m = GrMat::from_si(2, 3, &[1, -2, 0, 4, 5, 6], &ctx).unwrap();
    assert_eq!(m.to_text(&ctx), "[[1, -2, 0],\n[4, 5, 6]]\n");

    let ring = matrix_ctx(&ctx, 1);
    let mut x = ring.new_elem();
    assert!(ring.set_si(x.as_elem_mut(), 3).is_success());
    assert_eq!(ring.elem_to_string(x.as_elem()), "[[3]]\n");
}
