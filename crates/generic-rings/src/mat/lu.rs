//! Pivot search and LU decomposition under uncertain zero testing.
//!
//! Over a ring whose zero test can answer "don't know", row reduction has
//! three outcomes per column instead of two:
//!
//! | Pivot search | Meaning | LU reaction |
//! |--------------|---------|-------------|
//! | `Ok(row)` | `row` holds a provably nonzero entry | eliminate below it |
//! | `Err(DOMAIN)` | the column is provably zero | skip it, or stop in [`LuMode::RankCheck`] |
//! | `Err(UNABLE)` | no proven nonzero, some entry undecided | abort, the rank is not certified |
//!
//! The factors are stored in place: `U` on and above the pivot positions,
//! the `L` multipliers below them, with the row permutation reported
//! separately. For a full-rank square input, `P · A = L · U` where `L` is
//! unit lower triangular and `P` moves row `perm[i]` of `A` to row `i`.
//!
//! # Example
//!
//! ```
//! use generic_rings::{lu_classical, GrCtx, GrMat, LuMode, rings::Nmod};
//!
//! let ctx = GrCtx::new(Nmod::new(7).unwrap());
//! let a = GrMat::from_si(3, 3, &[1, 2, 3, 2, 4, 6, 1, 0, 1], &ctx).unwrap();
//! let mut lu = GrMat::new(3, 3, &ctx);
//!
//! let res = lu_classical(&mut lu, &a, LuMode::Full, &ctx);
//! assert!(res.status.is_success());
//! assert_eq!(res.rank, 2);
//! ```

use core::ops::Range;

use super::GrMat;
use crate::ctx::GrCtx;
use crate::elem::Elem;
use crate::error::GrResult;
use crate::status::{Status, Truth};
use crate::vec;

/// Finds a row in `rows` whose entry in `column` is provably nonzero.
///
/// Every row in the range is examined. Among proven nonzero candidates the
/// ring's [`cmp_repr`](crate::GrCtx::cmp_repr) picks the simplest; on ties
/// the earliest row is kept.
///
/// # Errors
///
/// - [`Status::DOMAIN`] when every entry in range is provably zero.
/// - [`Status::UNABLE`] when no entry is provably nonzero but at least one
///   zero test was undecided.
///
/// # Panics
///
/// Panics if `rows` is empty.
pub fn find_pivot(
    mat: &GrMat,
    rows: Range<usize>,
    column: usize,
    ctx: &GrCtx,
) -> Result<usize, Status> {
    assert!(!rows.is_empty(), "find_pivot called with an empty row range");
    mat.debug_assert_owned_by(ctx);

    let mut best: Option<usize> = None;
    let mut unknown = false;

    for i in rows {
        let x = mat.entry(i, column);
        match ctx.is_zero(x) {
            Truth::True => {}
            Truth::False => {
                let better = match best {
                    None => true,
                    Some(b) => ctx.cmp_repr(x, mat.entry(b, column)).is_lt(),
                };
                if better {
                    best = Some(i);
                }
            }
            Truth::Undecided(status) => {
                debug_assert!(
                    !ctx.is_exact(),
                    "exact ring {} left a zero test undecided ({status})",
                    ctx.describe()
                );
                unknown = true;
            }
        }
    }

    match best {
        Some(row) => Ok(row),
        None if unknown => Err(Status::UNABLE),
        None => Err(Status::DOMAIN),
    }
}

/// What the caller wants from the decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LuMode {
    /// Reduce the whole matrix and report its rank.
    #[default]
    Full,
    /// Only decide whether the matrix has full rank. The first provably
    /// zero column ends the decomposition with success and rank 0.
    RankCheck,
}

/// Outcome of [`lu_classical`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lu {
    /// Joined status of every step.
    pub status: Status,
    /// Number of pivots found (0 after a rank-deficiency certificate).
    pub rank: usize,
    /// Row permutation: row `i` of the factors came from row `perm[i]`.
    pub perm: Vec<usize>,
}

impl Lu {
    /// The rank, if the decomposition succeeded.
    ///
    /// # Errors
    ///
    /// The [`GrError`](crate::GrError) matching a non-success status.
    pub fn rank(&self) -> GrResult<usize> {
        self.status.check().map(|()| self.rank)
    }
}

/// Classical LU decomposition of `a` into `lu`, with row pivoting.
///
/// `lu` must have the shape of `a` (otherwise [`Status::DOMAIN`]). An empty
/// input succeeds with rank 0. The decomposition aborts with
/// [`Status::UNABLE`] as soon as a column's pivot cannot be decided, and
/// stops at the first failing pivot inversion.
pub fn lu_classical(lu: &mut GrMat, a: &GrMat, mode: LuMode, ctx: &GrCtx) -> Lu {
    let (m, n) = (a.nrows(), a.ncols());
    let mut perm: Vec<usize> = (0..m).collect();
    lu.debug_assert_owned_by(ctx);
    a.debug_assert_owned_by(ctx);

    if !lu.same_shape(a) {
        return Lu {
            status: Status::DOMAIN,
            rank: 0,
            perm,
        };
    }
    if a.is_empty() {
        return Lu {
            status: Status::SUCCESS,
            rank: 0,
            perm,
        };
    }

    let mut status = lu.set(a, ctx);
    let mut inv = ctx.new_elem();
    let mut prod = ctx.new_elem();
    let mut mult = ctx.new_elem();

    let (mut rank, mut row, mut col) = (0, 0, 0);
    while row < m && col < n {
        let pivot = match find_pivot(lu, row..m, col, ctx) {
            Ok(pivot) => pivot,
            Err(s) if s.is_unable() => {
                tracing::debug!(row, col, "pivot undecidable, rank not certified");
                status |= Status::UNABLE;
                break;
            }
            Err(_) => {
                if mode == LuMode::RankCheck {
                    tracing::debug!(col, "zero column, matrix is rank deficient");
                    status = Status::SUCCESS;
                    rank = 0;
                    break;
                }
                tracing::trace!(col, "zero column skipped");
                col += 1;
                continue;
            }
        };

        rank += 1;
        tracing::trace!(row, col, pivot, "pivot chosen");
        lu.swap_rows(Some(&mut perm), row, pivot);

        status |= ctx.inv(inv.as_elem_mut(), lu.entry(row, col));
        if !status.is_success() {
            tracing::debug!(row, col, %status, "pivot inversion failed");
            break;
        }

        for j in row + 1..m {
            status |= ctx.mul(prod.as_elem_mut(), lu.entry(j, col), inv.as_elem());
            status |= ctx.neg(mult.as_elem_mut(), prod.as_elem());
            status |= lu.row_addmul(j, row, col + 1, mult.as_elem(), ctx);
            status |= ctx.zero(lu.entry_mut(j, col));
            status |= ctx.neg(lu.entry_mut(j, rank - 1), mult.as_elem());
        }

        row += 1;
        col += 1;
    }

    Lu { status, rank, perm }
}

impl GrMat {
    /// Row `dst` from column `start` on: `+= c · (row src)`.
    fn row_addmul(
        &mut self,
        dst: usize,
        src: usize,
        start: usize,
        c: &Elem,
        ctx: &GrCtx,
    ) -> Status {
        debug_assert_ne!(dst, src);
        let len = self.c - start;
        let (d, s) = (self.rows[dst] + start, self.rows[src] + start);
        vec::scalar_addmul_within(self.buf_mut(), d, s, len, c, ctx)
    }

    /// Rank of the matrix, computed on a scratch copy.
    ///
    /// # Errors
    ///
    /// [`GrError::Unable`](crate::GrError::Unable) when some pivot could not
    /// be decided.
    pub fn rank(&self, ctx: &GrCtx) -> GrResult<usize> {
        let mut scratch = GrMat::new(self.nrows(), self.ncols(), ctx);
        lu_classical(&mut scratch, self, LuMode::Full, ctx).rank()
    }
}
