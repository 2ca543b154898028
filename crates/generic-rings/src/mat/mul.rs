//! Classical matrix multiplication.
//!
//! `C = A · B` is computed cell by cell as a dot product of a row of `A`
//! and a column of `B`. The columns of `B` are gathered once into a
//! column-major scratch table so each dot product walks two contiguous
//! sequences.
//!
//! Rust's borrow rules keep the output of [`GrMat::mul_classical`] distinct
//! from its inputs. The in-place forms ([`GrMat::mul_assign_right`],
//! [`GrMat::mul_assign_left`]) compute into a temporary of the result shape
//! and then swap its entries into place.

use super::GrMat;
use crate::ctx::GrCtx;
use crate::elem::Elem;
use crate::status::Status;
use crate::vec;

impl GrMat {
    /// `self = a · b`.
    ///
    /// Requires `a` to be `ar x ac`, `b` to be `ac x bc` and `self` to be
    /// `ar x bc`; any other shape reports [`Status::DOMAIN`] without touching
    /// `self`. An inner dimension of zero yields the zero matrix.
    pub fn mul_classical(&mut self, a: &GrMat, b: &GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        a.debug_assert_owned_by(ctx);
        b.debug_assert_owned_by(ctx);
        let (ar, ac, br, bc) = (a.nrows(), a.ncols(), b.nrows(), b.ncols());
        if ac != br || ar != self.nrows() || bc != self.ncols() {
            return Status::DOMAIN;
        }
        if br == 0 {
            return self.zero(ctx);
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }

        let mut status = Status::SUCCESS;
        if br == 1 {
            for i in 0..ar {
                for j in 0..bc {
                    status |= ctx.mul(self.entry_mut(i, j), a.entry(i, 0), b.entry(0, j));
                }
            }
            return status;
        }

        // Column j of b occupies bt[j * br..(j + 1) * br].
        let bt: Vec<&Elem> = (0..bc)
            .flat_map(|j| (0..br).map(move |i| b.entry(i, j)))
            .collect();

        for i in 0..ar {
            let row = a.row(i);
            for (j, col) in bt.chunks_exact(br).enumerate() {
                let pairs = row.iter().zip(col.iter().copied());
                status |= vec::dot_iter(self.entry_mut(i, j), None, false, pairs, ctx);
            }
        }
        status
    }

    /// `self = self · b`, computed through a temporary.
    ///
    /// `b` must be square with as many rows as `self` has columns.
    pub fn mul_assign_right(&mut self, b: &GrMat, ctx: &GrCtx) -> Status {
        if self.ncols() != b.nrows() || b.ncols() != self.ncols() {
            return Status::DOMAIN;
        }
        let mut tmp = GrMat::new(self.nrows(), b.ncols(), ctx);
        let status = tmp.mul_classical(self, b, ctx);
        status | self.swap_entrywise(&mut tmp, ctx)
    }

    /// `self = a · self`, computed through a temporary.
    ///
    /// `a` must be square with as many columns as `self` has rows.
    pub fn mul_assign_left(&mut self, a: &GrMat, ctx: &GrCtx) -> Status {
        if a.ncols() != self.nrows() || a.nrows() != self.nrows() {
            return Status::DOMAIN;
        }
        let mut tmp = GrMat::new(a.nrows(), self.ncols(), ctx);
        let status = tmp.mul_classical(a, self, ctx);
        status | self.swap_entrywise(&mut tmp, ctx)
    }

    /// `self = self · self` for a square matrix.
    pub fn square_in_place(&mut self, ctx: &GrCtx) -> Status {
        if !self.is_square() {
            return Status::DOMAIN;
        }
        let mut tmp = GrMat::new(self.nrows(), self.ncols(), ctx);
        let status = tmp.mul_classical(self, self, ctx);
        status | self.swap_entrywise(&mut tmp, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::{Nmod, RationalField};
    use crate::status::Truth;

    #[test]
    fn test_scenario_product() {
        let ctx = GrCtx::new(Nmod::new(7).unwrap());
        let a = GrMat::from_si(2, 2, &[1, 2, 3, 4], &ctx).unwrap();
        let b = GrMat::from_si(2, 2, &[0, 1, 1, 0], &ctx).unwrap();
        let mut c = GrMat::new(2, 2, &ctx);
        assert!(c.mul_classical(&a, &b, &ctx).is_success());
        assert_eq!(c.to_text(&ctx), "[[2, 1],\n[4, 3]]\n");
    }

    #[test]
    fn test_rectangular_product() {
        let ctx = GrCtx::new(RationalField::new());
        let a = GrMat::from_si(2, 3, &[1, 2, 3, 4, 5, 6], &ctx).unwrap();
        let b = GrMat::from_si(3, 1, &[1, 0, -1], &ctx).unwrap();
        let mut c = GrMat::new(2, 1, &ctx);
        assert!(c.mul_classical(&a, &b, &ctx).is_success());
        assert_eq!(c.to_text(&ctx), "[[-2],\n[-2]]\n");
    }

    #[test]
    fn test_inner_dimension_one_and_zero() {
        let ctx = GrCtx::new(Nmod::new(101).unwrap());
        let col = GrMat::from_si(2, 1, &[2, 3], &ctx).unwrap();
        let row = GrMat::from_si(1, 2, &[5, 7], &ctx).unwrap();
        let mut outer = GrMat::new(2, 2, &ctx);
        assert!(outer.mul_classical(&col, &row, &ctx).is_success());
        assert_eq!(outer.to_text(&ctx), "[[10, 14],\n[15, 21]]\n");

        let a = GrMat::new(2, 0, &ctx);
        let b = GrMat::new(0, 2, &ctx);
        assert!(outer.mul_classical(&a, &b, &ctx).is_success());
        assert_eq!(outer.is_zero(&ctx), Truth::True);
    }

    #[test]
    fn test_shape_mismatch_is_domain() {
        let ctx = GrCtx::new(Nmod::new(5).unwrap());
        let a = GrMat::from_si(2, 2, &[1, 1, 1, 1], &ctx).unwrap();
        let b = GrMat::new(3, 2, &ctx);
        let mut c = GrMat::from_si(2, 2, &[4, 4, 4, 4], &ctx).unwrap();
        assert_eq!(c.mul_classical(&a, &b, &ctx), Status::DOMAIN);
        assert_eq!(c.to_text(&ctx), "[[4, 4],\n[4, 4]]\n");

        let mut wrong = GrMat::new(2, 3, &ctx);
        assert_eq!(wrong.mul_classical(&a, &a, &ctx), Status::DOMAIN);
        assert_eq!(wrong.mul_assign_right(&a, &ctx), Status::DOMAIN);
        assert_eq!(wrong.square_in_place(&ctx), Status::DOMAIN);
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let ctx = GrCtx::new(Nmod::new(97).unwrap());
        let a = GrMat::from_si(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 10], &ctx).unwrap();
        let b = GrMat::from_si(3, 3, &[2, 0, 1, 1, 3, 0, 0, 1, 4], &ctx).unwrap();

        let mut ab = GrMat::new(3, 3, &ctx);
        assert!(ab.mul_classical(&a, &b, &ctx).is_success());
        let mut in_place = GrMat::new(3, 3, &ctx);
        assert!(in_place.set(&a, &ctx).is_success());
        assert!(in_place.mul_assign_right(&b, &ctx).is_success());
        assert_eq!(in_place.equal(&ab, &ctx), Truth::True);

        let mut ba = GrMat::new(3, 3, &ctx);
        assert!(ba.mul_classical(&b, &a, &ctx).is_success());
        assert!(in_place.set(&a, &ctx).is_success());
        assert!(in_place.mul_assign_left(&b, &ctx).is_success());
        assert_eq!(in_place.equal(&ba, &ctx), Truth::True);

        let mut aa = GrMat::new(3, 3, &ctx);
        assert!(aa.mul_classical(&a, &a, &ctx).is_success());
        assert!(in_place.set(&a, &ctx).is_success());
        assert!(in_place.square_in_place(&ctx).is_success());
        assert_eq!(in_place.equal(&aa, &ctx), Truth::True);
    }
}
