//! Generic matrices.
//!
//! A [`GrMat`] owns one contiguous [`ElemBuf`] of `r * c` entries plus a
//! table of row offsets into it. Row `i` is the run of `c` elements starting
//! at `rows[i]`; permuting rows only touches the offset table, never the
//! entries.
//!
//! ```text
//!   rows: [ 2c, 0, c ]          entries: | row A | row B | row C |
//!           │   │  └──────────────────────────────────┘
//!           │   └── row 1 ──> row A
//!           └────── row 0 ──> row C
//! ```
//!
//! Binary and ternary operations compare every operand shape first; a
//! mismatch reports [`Status::DOMAIN`] and leaves the output untouched.
//!
//! # Example
//!
//! ```
//! use generic_rings::{GrCtx, GrMat, Truth, rings::Nmod};
//!
//! let ctx = GrCtx::new(Nmod::new(5).unwrap());
//! let mut m = GrMat::new(3, 3, &ctx);
//! assert!(m.one(&ctx).is_success());
//! assert_eq!(m.is_one(&ctx), Truth::True);
//!
//! m.swap_rows(None, 0, 2);
//! assert_eq!(m.is_one(&ctx), Truth::False);
//! ```

pub mod lu;
pub mod mul;

use core::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::RngCore;

use crate::ctx::GrCtx;
use crate::elem::{Elem, ElemBuf};
use crate::error::{GrError, GrResult};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;
use crate::vec::{self, VecMut, VecRef};

/// A dense `r x c` matrix of erased elements.
///
/// The matrix does not remember its context: every operation takes the
/// context that allocated it. There is no internal locking.
pub struct GrMat {
    r: usize,
    c: usize,
    entries: Option<ElemBuf>,
    rows: Vec<usize>,
}

impl GrMat {
    /// Allocates an `r x c` matrix of zeros.
    ///
    /// No entry buffer is allocated when `r` or `c` is zero.
    #[must_use]
    pub fn new(r: usize, c: usize, ctx: &GrCtx) -> Self {
        let entries = match r.checked_mul(c) {
            Some(0) => None,
            Some(len) => Some(vec::init(len, ctx)),
            None => panic!("matrix dimensions {r} x {c} overflow"),
        };
        Self {
            r,
            c,
            entries,
            rows: (0..r).map(|i| i * c).collect(),
        }
    }

    /// Builds an `r x c` matrix from row-major small integers.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] when `values.len() != r * c`; otherwise the error
    /// of the first entry conversion the ring rejects.
    pub fn from_si(r: usize, c: usize, values: &[i64], ctx: &GrCtx) -> GrResult<Self> {
        if Some(values.len()) != r.checked_mul(c) {
            return Err(GrError::Domain);
        }
        let mut mat = Self::new(r, c, ctx);
        let mut status = Status::SUCCESS;
        for (k, &v) in values.iter().enumerate() {
            status |= ctx.set_si(mat.entry_mut(k / c, k % c), v);
        }
        status.check()?;
        Ok(mat)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.r
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.c
    }

    /// Returns true if the matrix has no entries (`r == 0` or `c == 0`).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.r == 0 || self.c == 0
    }

    /// Returns true if `r == c`.
    #[inline]
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.r == self.c
    }

    #[inline]
    fn same_shape(&self, other: &GrMat) -> bool {
        self.r == other.r && self.c == other.c
    }

    #[inline]
    fn buf(&self) -> &ElemBuf {
        match &self.entries {
            Some(buf) => buf,
            None => panic!("matrix {} x {} has no entries", self.r, self.c),
        }
    }

    #[inline]
    fn buf_mut(&mut self) -> &mut ElemBuf {
        match &mut self.entries {
            Some(buf) => buf,
            None => panic!("matrix {} x {} has no entries", self.r, self.c),
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.r && j < self.c,
            "entry ({i}, {j}) out of bounds for {} x {} matrix",
            self.r,
            self.c
        );
        self.rows[i] + j
    }

    /// Entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[must_use]
    pub fn entry(&self, i: usize, j: usize) -> &Elem {
        let k = self.offset(i, j);
        self.buf().get(k)
    }

    /// Mutable entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut Elem {
        let k = self.offset(i, j);
        self.buf_mut().get_mut(k)
    }

    /// Row `i` as a vector run.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the matrix has no columns.
    #[must_use]
    pub fn row(&self, i: usize) -> VecRef<'_> {
        assert!(i < self.r, "row {i} out of bounds for {} rows", self.r);
        VecRef::new(self.buf(), self.rows[i], self.c)
    }

    /// Row `i` as a mutable vector run.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the matrix has no columns.
    pub fn row_mut(&mut self, i: usize) -> VecMut<'_> {
        assert!(i < self.r, "row {i} out of bounds for {} rows", self.r);
        let (start, len) = (self.rows[i], self.c);
        VecMut::new(self.buf_mut(), start, len)
    }

    /// Positions of two distinct entries, for in-buffer pair access.
    fn pair_mut(&mut self, dst: (usize, usize), src: (usize, usize)) -> (&mut Elem, &Elem) {
        let (d, s) = (self.offset(dst.0, dst.1), self.offset(src.0, src.1));
        let (d, s) = self.buf_mut().pair_mut(d, s);
        (d, s)
    }

    /// Entries must come from `ctx` itself or one of its clones.
    #[inline]
    fn debug_assert_owned_by(&self, ctx: &GrCtx) {
        if let Some(buf) = &self.entries {
            ctx.debug_assert_owns(buf);
        }
    }

    // ========================================================================
    // Swaps
    // ========================================================================

    /// Exchanges the whole state of two matrices in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut GrMat) {
        core::mem::swap(self, other);
    }

    /// Exchanges contents position by position, keeping each matrix's
    /// storage in place.
    pub fn swap_entrywise(&mut self, other: &mut GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        other.debug_assert_owned_by(ctx);
        if !self.same_shape(other) {
            return Status::DOMAIN;
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r)
            .map(|i| vec::swap(self.row_mut(i), other.row_mut(i), ctx))
            .collect()
    }

    /// Exchanges rows `r` and `s` by swapping their offsets in O(1).
    ///
    /// When `perm` is given, its entries `r` and `s` are exchanged too.
    ///
    /// # Panics
    ///
    /// Panics if `r` or `s` is out of bounds.
    pub fn swap_rows(&mut self, perm: Option<&mut [usize]>, r: usize, s: usize) {
        if r != s {
            if let Some(perm) = perm {
                perm.swap(r, s);
            }
            self.rows.swap(r, s);
        }
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    /// Sets every entry to zero.
    pub fn zero(&mut self, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r).map(|i| vec::zero(self.row_mut(i), ctx)).collect()
    }

    /// Zeroes the matrix, converts a scalar into entry `(0, 0)`, then copies
    /// that entry along the diagonal.
    fn set_scalar(&mut self, ctx: &GrCtx, convert: impl FnOnce(&mut Elem) -> Status) -> Status {
        let mut status = self.zero(ctx);
        if !self.is_empty() {
            status |= convert(self.entry_mut(0, 0));
            for i in 1..self.r.min(self.c) {
                let (dst, src) = self.pair_mut((i, i), (0, 0));
                status |= ctx.set(dst, src);
            }
        }
        status
    }

    /// Scalar matrix `v * I` for a small signed integer.
    pub fn set_si(&mut self, v: i64, ctx: &GrCtx) -> Status {
        self.set_scalar(ctx, |x| ctx.set_si(x, v))
    }

    /// Scalar matrix `v * I` for a small unsigned integer.
    pub fn set_ui(&mut self, v: u64, ctx: &GrCtx) -> Status {
        self.set_scalar(ctx, |x| ctx.set_ui(x, v))
    }

    /// Scalar matrix `v * I` for an arbitrary-precision integer.
    pub fn set_bigint(&mut self, v: &BigInt, ctx: &GrCtx) -> Status {
        self.set_scalar(ctx, |x| ctx.set_bigint(x, v))
    }

    /// Scalar matrix `v * I` for an arbitrary-precision rational.
    pub fn set_rational(&mut self, v: &BigRational, ctx: &GrCtx) -> Status {
        self.set_scalar(ctx, |x| ctx.set_rational(x, v))
    }

    /// The identity (ones on the diagonal of a rectangular matrix).
    #[inline]
    pub fn one(&mut self, ctx: &GrCtx) -> Status {
        self.set_si(1, ctx)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// `self = src`.
    pub fn set(&mut self, src: &GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        src.debug_assert_owned_by(ctx);
        if !self.same_shape(src) {
            return Status::DOMAIN;
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r)
            .map(|i| vec::set(self.row_mut(i), src.row(i), ctx))
            .collect()
    }

    /// `self = -src`.
    pub fn neg(&mut self, src: &GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        src.debug_assert_owned_by(ctx);
        if !self.same_shape(src) {
            return Status::DOMAIN;
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r)
            .map(|i| vec::neg(self.row_mut(i), src.row(i), ctx))
            .collect()
    }

    /// `self = a + b`.
    pub fn add(&mut self, a: &GrMat, b: &GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        a.debug_assert_owned_by(ctx);
        b.debug_assert_owned_by(ctx);
        if !self.same_shape(a) || !self.same_shape(b) {
            return Status::DOMAIN;
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r)
            .map(|i| vec::add(self.row_mut(i), a.row(i), b.row(i), ctx))
            .collect()
    }

    /// `self = a - b`.
    pub fn sub(&mut self, a: &GrMat, b: &GrMat, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        a.debug_assert_owned_by(ctx);
        b.debug_assert_owned_by(ctx);
        if !self.same_shape(a) || !self.same_shape(b) {
            return Status::DOMAIN;
        }
        if self.is_empty() {
            return Status::SUCCESS;
        }
        (0..self.r)
            .map(|i| vec::sub(self.row_mut(i), a.row(i), b.row(i), ctx))
            .collect()
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Is every entry zero? Vacuously true for an empty matrix.
    pub fn is_zero(&self, ctx: &GrCtx) -> Truth {
        self.debug_assert_owned_by(ctx);
        if self.is_empty() {
            return Truth::True;
        }
        Truth::all((0..self.r).map(|i| vec::is_zero(self.row(i), ctx)))
    }

    /// Diagonal entries satisfy `diag`, all others are zero.
    fn is_scalar_with(&self, ctx: &GrCtx, diag: impl Fn(&Elem) -> Truth) -> Truth {
        self.debug_assert_owned_by(ctx);
        if self.is_empty() {
            return Truth::True;
        }
        let (r, c) = (self.r, self.c);
        Truth::all((0..r).flat_map(|i| (0..c).map(move |j| (i, j))).map(|(i, j)| {
            let x = self.entry(i, j);
            if i == j {
                diag(x)
            } else {
                ctx.is_zero(x)
            }
        }))
    }

    /// Is this the identity? Vacuously true for an empty matrix.
    pub fn is_one(&self, ctx: &GrCtx) -> Truth {
        self.is_scalar_with(ctx, |x| ctx.is_one(x))
    }

    /// Is this minus the identity? Vacuously true for an empty matrix.
    pub fn is_neg_one(&self, ctx: &GrCtx) -> Truth {
        self.is_scalar_with(ctx, |x| ctx.is_neg_one(x))
    }

    /// Is `self == other`?
    ///
    /// Matrices of different shapes are not comparable: the answer is
    /// undecided with [`Status::DOMAIN`].
    pub fn equal(&self, other: &GrMat, ctx: &GrCtx) -> Truth {
        self.debug_assert_owned_by(ctx);
        other.debug_assert_owned_by(ctx);
        if !self.same_shape(other) {
            return Truth::Undecided(Status::DOMAIN);
        }
        if self.is_empty() {
            return Truth::True;
        }
        Truth::all((0..self.r).map(|i| vec::equal(self.row(i), other.row(i), ctx)))
    }

    // ========================================================================
    // Random and textual output
    // ========================================================================

    /// Fills the matrix row by row with random entries.
    pub fn randtest(&mut self, rng: &mut dyn RngCore, opts: &RandOptions, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        if self.is_empty() {
            return Status::SUCCESS;
        }
        let mut status = Status::SUCCESS;
        for i in 0..self.r {
            status |= vec::randtest(self.row_mut(i), rng, opts, ctx);
        }
        status
    }

    /// Writes `[[e00, e01],\n[e10, e11]]\n`.
    pub fn write(&self, out: &mut GrStream, ctx: &GrCtx) -> Status {
        self.debug_assert_owned_by(ctx);
        let mut status = Status::SUCCESS;
        out.write("[");
        for i in 0..self.r {
            out.write("[");
            for j in 0..self.c {
                status |= ctx.write(out, self.entry(i, j));
                if j + 1 < self.c {
                    out.write(", ");
                }
            }
            out.write(if i + 1 < self.r { "],\n" } else { "]" });
        }
        out.write("]\n");
        status
    }

    /// The textual form as an owned string.
    #[must_use]
    pub fn to_text(&self, ctx: &GrCtx) -> String {
        let mut out = GrStream::new();
        let _ = self.write(&mut out, ctx);
        out.into_string()
    }

    /// Prints the textual form to standard output.
    pub fn print(&self, ctx: &GrCtx) -> Status {
        let mut out = GrStream::new();
        let status = self.write(&mut out, ctx);
        print!("{}", out.as_str());
        status
    }
}

impl fmt::Debug for GrMat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrMat")
            .field("r", &self.r)
            .field("c", &self.c)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}
