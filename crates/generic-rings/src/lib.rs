//! Generic Rings - one set of matrix algorithms over any algebraic ring.
//!
//! A [`GrCtx`] describes one concrete ring: its element layout, structural
//! flags, and a dispatch table of element operations. Vectors and matrices
//! hold erased elements and reach the ring only through that table, so the
//! same arithmetic, predicate, and row-reduction code runs over integers
//! modulo `n`, exact rationals, real balls, or rings of matrices over any of
//! those.
//!
//! # Layers
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Status | [`status`] | `Success` / `Domain` / `Unable` lattice, [`Truth`] |
//! | Context | [`ctx`] | [`Ring`] contract, erased [`Methods`], [`MethodRegistry`] |
//! | Elements | [`elem`] | Fixed-stride [`ElemBuf`], single [`GrElem`] temporaries |
//! | Vectors | [`vec`] | Elementwise runs with status aggregation |
//! | Matrices | [`mat`] | [`GrMat`], classical multiply, LU with pivot search |
//! | Composition | [`matrix_ring`] | n x n matrices over a base ring, as a ring |
//!
//! # Three-valued outcomes
//!
//! Every operation returns a [`Status`]. `Domain` means the request is
//! mathematically impossible (shape mismatch, provably zero pivot).
//! `Unable` means the ring could not decide a predicate it needed, as happens
//! for ball arithmetic where a ball straddling zero is neither provably zero
//! nor provably nonzero. Composite algorithms join the statuses of their
//! steps, so an `Unable` anywhere is visible to the caller.
//!
//! # Example
//!
//! ```
//! use generic_rings::{GrCtx, GrMat, Status, rings::Nmod};
//!
//! let ctx = GrCtx::new(Nmod::new(7).unwrap());
//! let a = GrMat::from_si(2, 2, &[1, 2, 3, 4], &ctx).unwrap();
//! let b = GrMat::from_si(2, 2, &[0, 1, 1, 0], &ctx).unwrap();
//!
//! let mut c = GrMat::new(2, 2, &ctx);
//! assert_eq!(c.mul_classical(&a, &b, &ctx), Status::SUCCESS);
//! assert_eq!(c.to_text(&ctx), "[[2, 1],\n[4, 3]]\n");
//! ```
//!
//! # Concurrency
//!
//! Method tables are built once per ring kind behind a lock, so contexts may
//! be constructed from any thread. Matrices and element buffers carry no
//! internal locking: mutate them from a single writer or synchronize
//! externally.

#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// Status lattice and predicate outcomes
pub mod status;

// Error type for `Result`-style callers
pub mod error;

// Ring contexts, dispatch tables, and the method registry
pub mod ctx;

// Erased element storage
pub mod elem;

// Output sink for textual rendering
pub mod stream;

// Random generation options
pub mod randtest;

// Generic vector operations
pub mod vec;

// Generic matrices and matrix algorithms
pub mod mat;

// Rings of matrices over a base ring
pub mod matrix_ring;

// Concrete ring kinds
pub mod rings;

pub use ctx::registry::MethodRegistry;
pub use ctx::{CtxFlags, GrCtx, Methods, Ring};
pub use elem::{Elem, ElemBuf, GrElem};
pub use error::{GrError, GrResult};
pub use mat::lu::{find_pivot, lu_classical, Lu, LuMode};
pub use mat::GrMat;
pub use matrix_ring::{matrix_ctx, MatrixRing};
pub use randtest::RandOptions;
pub use status::{Status, Truth};
pub use stream::GrStream;
pub use vec::{VecMut, VecRef};

/// Prelude module for convenient imports.
///
/// ```
/// use generic_rings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ctx::{CtxFlags, GrCtx, Ring};
    pub use crate::elem::{Elem, GrElem};
    pub use crate::error::{GrError, GrResult};
    pub use crate::mat::lu::{lu_classical, Lu, LuMode};
    pub use crate::mat::GrMat;
    pub use crate::matrix_ring::{matrix_ctx, MatrixRing};
    pub use crate::randtest::RandOptions;
    pub use crate::rings::{Ball, BallRing, Nmod, RationalField};
    pub use crate::status::{Status, Truth};
    pub use crate::stream::GrStream;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_2x2_over_nmod() {
        let ctx = GrCtx::new(rings::Nmod::new(101).unwrap());
        let a = GrMat::from_si(2, 2, &[1, 2, 3, 4], &ctx).unwrap();
        let b = GrMat::from_si(2, 2, &[0, 1, 1, 0], &ctx).unwrap();

        let mut prod = GrMat::new(2, 2, &ctx);
        assert!(prod.mul_classical(&a, &b, &ctx).is_success());
        let expected = GrMat::from_si(2, 2, &[2, 1, 4, 3], &ctx).unwrap();
        assert_eq!(prod.equal(&expected, &ctx), Truth::True);

        let mut sum = GrMat::new(2, 2, &ctx);
        assert!(sum.add(&a, &b, &ctx).is_success());
        let expected = GrMat::from_si(2, 2, &[1, 3, 4, 4], &ctx).unwrap();
        assert_eq!(sum.equal(&expected, &ctx), Truth::True);
    }

    #[test]
    fn test_scenario_2x2_over_rationals() {
        let ctx = GrCtx::new(rings::RationalField::new());
        let a = GrMat::from_si(2, 2, &[1, 2, 3, 4], &ctx).unwrap();
        let b = GrMat::from_si(2, 2, &[0, 1, 1, 0], &ctx).unwrap();

        let mut prod = GrMat::new(2, 2, &ctx);
        assert!(prod.mul_classical(&a, &b, &ctx).is_success());
        assert_eq!(prod.to_text(&ctx), "[[2, 1],\n[4, 3]]\n");

        let mut sum = GrMat::new(2, 2, &ctx);
        assert!(sum.add(&a, &b, &ctx).is_success());
        assert_eq!(sum.to_text(&ctx), "[[1, 3],\n[4, 4]]\n");
    }
}
