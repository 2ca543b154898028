//! Property-based tests for generic matrix arithmetic.
//!
//! Residue rings are exact, so every identity below must hold with a
//! decided `True`.

use generic_rings::prelude::*;
use proptest::prelude::*;

fn zn(n: u64) -> GrCtx {
    GrCtx::new(Nmod::new(n).unwrap())
}

fn mat(r: usize, c: usize, values: &[i64], ctx: &GrCtx) -> GrMat {
    GrMat::from_si(r, c, values, ctx).unwrap()
}

fn square(n: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..1000, n * n)
}

// =============================================================================
// Additive Structure
// =============================================================================

proptest! {
    /// (A + B) - B = A
    #[test]
    fn prop_add_sub_inverse(n in 2u64..1000, a in square(3), b in square(3)) {
        let ctx = zn(n);
        let (a, b) = (mat(3, 3, &a, &ctx), mat(3, 3, &b, &ctx));
        let mut sum = GrMat::new(3, 3, &ctx);
        let mut back = GrMat::new(3, 3, &ctx);
        prop_assert!(sum.add(&a, &b, &ctx).is_success());
        prop_assert!(back.sub(&sum, &b, &ctx).is_success());
        prop_assert_eq!(back.equal(&a, &ctx), Truth::True);
    }

    /// A + (-A) = 0
    #[test]
    fn prop_neg_is_additive_inverse(n in 2u64..1000, a in square(2)) {
        let ctx = zn(n);
        let a = mat(2, 2, &a, &ctx);
        let mut neg = GrMat::new(2, 2, &ctx);
        let mut sum = GrMat::new(2, 2, &ctx);
        prop_assert!(neg.neg(&a, &ctx).is_success());
        prop_assert!(sum.add(&a, &neg, &ctx).is_success());
        prop_assert_eq!(sum.is_zero(&ctx), Truth::True);
    }
}

// =============================================================================
// Multiplicative Structure
// =============================================================================

proptest! {
    /// (AB)C = A(BC)
    #[test]
    fn prop_mul_associative(n in 2u64..1000, a in square(3), b in square(3), c in square(3)) {
        let ctx = zn(n);
        let (a, b, c) = (mat(3, 3, &a, &ctx), mat(3, 3, &b, &ctx), mat(3, 3, &c, &ctx));
        let mut ab = GrMat::new(3, 3, &ctx);
        let mut bc = GrMat::new(3, 3, &ctx);
        let mut left = GrMat::new(3, 3, &ctx);
        let mut right = GrMat::new(3, 3, &ctx);
        prop_assert!(ab.mul_classical(&a, &b, &ctx).is_success());
        prop_assert!(bc.mul_classical(&b, &c, &ctx).is_success());
        prop_assert!(left.mul_classical(&ab, &c, &ctx).is_success());
        prop_assert!(right.mul_classical(&a, &bc, &ctx).is_success());
        prop_assert_eq!(left.equal(&right, &ctx), Truth::True);
    }

    /// A(B + C) = AB + AC
    #[test]
    fn prop_mul_distributes(n in 2u64..1000, a in square(2), b in square(2), c in square(2)) {
        let ctx = zn(n);
        let (a, b, c) = (mat(2, 2, &a, &ctx), mat(2, 2, &b, &ctx), mat(2, 2, &c, &ctx));
        let mut bc = GrMat::new(2, 2, &ctx);
        let mut lhs = GrMat::new(2, 2, &ctx);
        let mut ab = GrMat::new(2, 2, &ctx);
        let mut ac = GrMat::new(2, 2, &ctx);
        let mut rhs = GrMat::new(2, 2, &ctx);
        prop_assert!(bc.add(&b, &c, &ctx).is_success());
        prop_assert!(lhs.mul_classical(&a, &bc, &ctx).is_success());
        prop_assert!(ab.mul_classical(&a, &b, &ctx).is_success());
        prop_assert!(ac.mul_classical(&a, &c, &ctx).is_success());
        prop_assert!(rhs.add(&ab, &ac, &ctx).is_success());
        prop_assert_eq!(lhs.equal(&rhs, &ctx), Truth::True);
    }

    /// In-place products agree with the out-of-place product.
    #[test]
    fn prop_in_place_mul_matches(n in 2u64..1000, a in square(3), b in square(3)) {
        let ctx = zn(n);
        let (a, b) = (mat(3, 3, &a, &ctx), mat(3, 3, &b, &ctx));
        let mut expected = GrMat::new(3, 3, &ctx);
        prop_assert!(expected.mul_classical(&a, &b, &ctx).is_success());

        let mut right = GrMat::new(3, 3, &ctx);
        prop_assert!(right.set(&a, &ctx).is_success());
        prop_assert!(right.mul_assign_right(&b, &ctx).is_success());
        prop_assert_eq!(right.equal(&expected, &ctx), Truth::True);

        let mut left = GrMat::new(3, 3, &ctx);
        prop_assert!(left.set(&b, &ctx).is_success());
        prop_assert!(left.mul_assign_left(&a, &ctx).is_success());
        prop_assert_eq!(left.equal(&expected, &ctx), Truth::True);
    }

    /// Rectangular products: (r x k)(k x c) has shape r x c, I·A = A.
    #[test]
    fn prop_identity_is_neutral(
        (r, c, values) in (1usize..5, 1usize..5)
            .prop_flat_map(|(r, c)| (Just(r), Just(c), prop::collection::vec(-50i64..50, r * c)))
    ) {
        let ctx = zn(97);
        let a = mat(r, c, &values, &ctx);
        let mut id = GrMat::new(r, r, &ctx);
        prop_assert!(id.one(&ctx).is_success());
        let mut prod = GrMat::new(r, c, &ctx);
        prop_assert!(prod.mul_classical(&id, &a, &ctx).is_success());
        prop_assert_eq!(prod.equal(&a, &ctx), Truth::True);
    }
}

// =============================================================================
// Rank
// =============================================================================

proptest! {
    /// rank(A) <= min(rows, cols) over a prime field.
    #[test]
    fn prop_rank_bounded(
        (r, c, values) in (1usize..6, 1usize..6)
            .prop_flat_map(|(r, c)| (Just(r), Just(c), prop::collection::vec(-20i64..20, r * c)))
    ) {
        let ctx = zn(101);
        let a = mat(r, c, &values, &ctx);
        let rank = a.rank(&ctx).unwrap();
        prop_assert!(rank <= r.min(c));
    }

    /// The reported row order is a permutation of the input rows.
    #[test]
    fn prop_lu_perm_is_permutation(values in square(4)) {
        let ctx = zn(101);
        let a = mat(4, 4, &values, &ctx);
        let mut lu = GrMat::new(4, 4, &ctx);
        let res = lu_classical(&mut lu, &a, LuMode::Full, &ctx);
        prop_assert!(res.status.is_success());
        let mut seen = res.perm.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
