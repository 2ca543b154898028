//! Rings of `n x n` matrices over a base ring.
//!
//! [`MatrixRing`] is an ordinary [`Ring`] whose elements are [`GrMat`]s.
//! Every operation delegates to the generic matrix routines with the base
//! context, so a matrix ring can itself be the base of another matrix ring.
//!
//! All matrix rings share one method table, whatever their base and
//! dimension: `(base, n)` lives in the context's auxiliary data.
//!
//! | Property | Value |
//! |----------|-------|
//! | Element | [`GrMat`] handle (the entries live in the matrix's own buffer) |
//! | Flags | `FINITE` and `EXACT` inherited from the base ring |
//! | `mul` | [`GrMat::mul_classical`] |
//! | `inv` | not provided (`Unable`) |
//!
//! # Example
//!
//! ```
//! use generic_rings::{matrix_ctx, GrCtx, Truth, rings::Nmod};
//!
//! let zn = GrCtx::new(Nmod::new(3).unwrap());
//! let m2 = matrix_ctx(&zn, 2);
//! let m2m2 = matrix_ctx(&m2, 2);
//! assert_eq!(
//!     m2m2.describe(),
//!     "Ring of 2 x 2 matrices over Ring of 2 x 2 matrices over Integers mod 3 (nmod)"
//! );
//!
//! let mut x = m2m2.new_elem();
//! assert!(m2m2.one(x.as_elem_mut()).is_success());
//! assert_eq!(m2m2.is_one(x.as_elem()), Truth::True);
//! ```

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::RngCore;

use crate::ctx::{CtxFlags, GrCtx, Ring};
use crate::mat::GrMat;
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

/// The ring of `n x n` matrices over `base`.
#[derive(Debug, Clone)]
pub struct MatrixRing {
    base: GrCtx,
    n: usize,
}

impl MatrixRing {
    /// Matrices of dimension `n` over `base`.
    #[must_use]
    pub fn new(base: GrCtx, n: usize) -> Self {
        Self { base, n }
    }

    /// The base ring.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &GrCtx {
        &self.base
    }

    /// The dimension.
    #[inline]
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }
}

/// Context for `n x n` matrices over `base`.
#[must_use]
pub fn matrix_ctx(base: &GrCtx, n: usize) -> GrCtx {
    GrCtx::new(MatrixRing::new(base.clone(), n))
}

impl Ring for MatrixRing {
    type Elem = GrMat;

    fn flags(&self) -> CtxFlags {
        self.base.flags() & (CtxFlags::FINITE | CtxFlags::EXACT)
    }

    fn write_ctx(&self, out: &mut GrStream) -> Status {
        out.write("Ring of ");
        out.write_ui(self.n as u64);
        out.write(" x ");
        out.write_ui(self.n as u64);
        out.write(" matrices over ");
        self.base.write_ctx(out)
    }

    fn init(&self) -> GrMat {
        GrMat::new(self.n, self.n, &self.base)
    }

    fn set(&self, res: &mut GrMat, x: &GrMat) -> Status {
        res.set(x, &self.base)
    }

    fn zero(&self, res: &mut GrMat) -> Status {
        res.zero(&self.base)
    }

    fn one(&self, res: &mut GrMat) -> Status {
        res.one(&self.base)
    }

    fn set_si(&self, res: &mut GrMat, v: i64) -> Status {
        res.set_si(v, &self.base)
    }

    fn set_ui(&self, res: &mut GrMat, v: u64) -> Status {
        res.set_ui(v, &self.base)
    }

    fn set_bigint(&self, res: &mut GrMat, v: &BigInt) -> Status {
        res.set_bigint(v, &self.base)
    }

    fn set_rational(&self, res: &mut GrMat, v: &BigRational) -> Status {
        res.set_rational(v, &self.base)
    }

    fn is_zero(&self, x: &GrMat) -> Truth {
        x.is_zero(&self.base)
    }

    fn is_one(&self, x: &GrMat) -> Truth {
        x.is_one(&self.base)
    }

    fn is_neg_one(&self, x: &GrMat) -> Truth {
        x.is_neg_one(&self.base)
    }

    fn equal(&self, x: &GrMat, y: &GrMat) -> Truth {
        x.equal(y, &self.base)
    }

    fn neg(&self, res: &mut GrMat, x: &GrMat) -> Status {
        res.neg(x, &self.base)
    }

    fn add(&self, res: &mut GrMat, x: &GrMat, y: &GrMat) -> Status {
        res.add(x, y, &self.base)
    }

    fn sub(&self, res: &mut GrMat, x: &GrMat, y: &GrMat) -> Status {
        res.sub(x, y, &self.base)
    }

    fn mul(&self, res: &mut GrMat, x: &GrMat, y: &GrMat) -> Status {
        res.mul_classical(x, y, &self.base)
    }

    fn randtest(&self, res: &mut GrMat, rng: &mut dyn RngCore, opts: &RandOptions) -> Status {
        res.randtest(rng, opts, &self.base)
    }

    fn write(&self, out: &mut GrStream, x: &GrMat) -> Status {
        x.write(out, &self.base)
    }

    /// Entrywise, in row-major order, by the base ring's order.
    fn cmp_repr(&self, x: &GrMat, y: &GrMat) -> Ordering {
        if x.nrows() != y.nrows() || x.ncols() != y.ncols() {
            return Ordering::Equal;
        }
        (0..x.nrows())
            .flat_map(|i| (0..x.ncols()).map(move |j| (i, j)))
            .map(|(i, j)| self.base.cmp_repr(x.entry(i, j), y.entry(i, j)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
