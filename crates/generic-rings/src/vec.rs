//! Generic vector operations.
//!
//! A vector is not an object of its own: it is a run of `len` consecutive
//! elements inside an [`ElemBuf`], starting at some offset, interpreted by a
//! context. [`VecRef`] and [`VecMut`] are those `(buffer, offset, len)`
//! triples; the borrow checker keeps an output run from aliasing an input.
//!
//! Every routine walks the run front to back, calls the matching element
//! operation, and joins the per-element statuses.
//!
//! | Routine | Effect |
//! |---------|--------|
//! | [`zero`], [`set`], [`neg`] | elementwise unary |
//! | [`add`], [`sub`] | elementwise binary |
//! | [`equal`], [`is_zero`] | predicates, scanning past undecided entries |
//! | [`dot`] | `initial ± Σ a_i b_i` |
//! | [`scalar_addmul`] | `res_i += c · src_i` |
//! | [`swap`], [`randtest`] | exchange, random fill |
//!
//! Length mismatches between runs are caller bugs and panic; shape checks
//! that produce `Domain` live one layer up, in the matrix routines.

use rand::{Rng, RngCore};

use crate::ctx::GrCtx;
use crate::elem::{Elem, ElemBuf};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};

// ============================================================================
// Views
// ============================================================================

/// A read-only run of elements.
#[derive(Debug, Clone, Copy)]
pub struct VecRef<'a> {
    buf: &'a ElemBuf,
    start: usize,
    len: usize,
}

impl<'a> VecRef<'a> {
    /// The run `buf[start..start + len]`.
    ///
    /// # Panics
    ///
    /// Panics if the run extends past the end of `buf`.
    #[must_use]
    pub fn new(buf: &'a ElemBuf, start: usize, len: usize) -> Self {
        assert!(
            start.checked_add(len).is_some_and(|end| end <= buf.len()),
            "vector run {start}..+{len} exceeds buffer of {} elements",
            buf.len()
        );
        Self { buf, start, len }
    }

    /// The whole buffer as one run.
    #[must_use]
    pub fn whole(buf: &'a ElemBuf) -> Self {
        Self {
            buf,
            start: 0,
            len: buf.len(),
        }
    }

    /// Number of elements in the run.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the run is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `i` of the run.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> &'a Elem {
        assert!(i < self.len, "index {i} out of run of length {}", self.len);
        self.buf.get(self.start + i)
    }

    /// Iterates the run front to back.
    pub fn iter(&self) -> impl Iterator<Item = &'a Elem> + 'a {
        let Self { buf, start, len } = *self;
        (start..start + len).map(move |k| buf.get(k))
    }
}

/// A mutable run of elements.
#[derive(Debug)]
pub struct VecMut<'a> {
    buf: &'a mut ElemBuf,
    start: usize,
    len: usize,
}

impl<'a> VecMut<'a> {
    /// The run `buf[start..start + len]`.
    ///
    /// # Panics
    ///
    /// Panics if the run extends past the end of `buf`.
    pub fn new(buf: &'a mut ElemBuf, start: usize, len: usize) -> Self {
        assert!(
            start.checked_add(len).is_some_and(|end| end <= buf.len()),
            "vector run {start}..+{len} exceeds buffer of {} elements",
            buf.len()
        );
        Self { buf, start, len }
    }

    /// The whole buffer as one run.
    pub fn whole(buf: &'a mut ElemBuf) -> Self {
        let len = buf.len();
        Self { buf, start: 0, len }
    }

    /// Number of elements in the run.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the run is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `i` of the run.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> &Elem {
        assert!(i < self.len, "index {i} out of run of length {}", self.len);
        self.buf.get(self.start + i)
    }

    /// Mutable element `i` of the run.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> &mut Elem {
        assert!(i < self.len, "index {i} out of run of length {}", self.len);
        self.buf.get_mut(self.start + i)
    }

    /// Read-only view of the same run.
    #[must_use]
    pub fn view(&self) -> VecRef<'_> {
        VecRef {
            buf: &*self.buf,
            start: self.start,
            len: self.len,
        }
    }

    /// Shorter-lived mutable view of the same run.
    pub fn reborrow(&mut self) -> VecMut<'_> {
        VecMut {
            buf: &mut *self.buf,
            start: self.start,
            len: self.len,
        }
    }
}

#[inline]
fn check_len(a: usize, b: usize) {
    assert_eq!(a, b, "vector length mismatch");
}

// ============================================================================
// Lifecycle and elementwise routines
// ============================================================================

/// Allocates and constructs `len` zero elements.
#[must_use]
pub fn init(len: usize, ctx: &GrCtx) -> ElemBuf {
    ctx.new_buf(len)
}

/// `res_i = 0`.
pub fn zero(mut res: VecMut<'_>, ctx: &GrCtx) -> Status {
    (0..res.len()).map(|i| ctx.zero(res.get_mut(i))).collect()
}

/// `res_i = src_i`.
pub fn set(mut res: VecMut<'_>, src: VecRef<'_>, ctx: &GrCtx) -> Status {
    check_len(res.len(), src.len());
    (0..res.len())
        .map(|i| ctx.set(res.get_mut(i), src.get(i)))
        .collect()
}

/// `res_i = -src_i`.
pub fn neg(mut res: VecMut<'_>, src: VecRef<'_>, ctx: &GrCtx) -> Status {
    check_len(res.len(), src.len());
    (0..res.len())
        .map(|i| ctx.neg(res.get_mut(i), src.get(i)))
        .collect()
}

/// `res_i = a_i + b_i`.
pub fn add(mut res: VecMut<'_>, a: VecRef<'_>, b: VecRef<'_>, ctx: &GrCtx) -> Status {
    check_len(res.len(), a.len());
    check_len(a.len(), b.len());
    (0..res.len())
        .map(|i| ctx.add(res.get_mut(i), a.get(i), b.get(i)))
        .collect()
}

/// `res_i = a_i - b_i`.
pub fn sub(mut res: VecMut<'_>, a: VecRef<'_>, b: VecRef<'_>, ctx: &GrCtx) -> Status {
    check_len(res.len(), a.len());
    check_len(a.len(), b.len());
    (0..res.len())
        .map(|i| ctx.sub(res.get_mut(i), a.get(i), b.get(i)))
        .collect()
}

/// Exchanges the contents of two runs element by element.
pub fn swap(mut a: VecMut<'_>, mut b: VecMut<'_>, ctx: &GrCtx) -> Status {
    check_len(a.len(), b.len());
    (0..a.len())
        .map(|i| ctx.swap(a.get_mut(i), b.get_mut(i)))
        .collect()
}

/// Is `a == b` elementwise?
///
/// Stops at the first entry proven different; an undecided entry does not
/// stop the scan.
pub fn equal(a: VecRef<'_>, b: VecRef<'_>, ctx: &GrCtx) -> Truth {
    check_len(a.len(), b.len());
    Truth::all(a.iter().zip(b.iter()).map(|(x, y)| ctx.equal(x, y)))
}

/// Is every entry zero?
pub fn is_zero(a: VecRef<'_>, ctx: &GrCtx) -> Truth {
    Truth::all(a.iter().map(|x| ctx.is_zero(x)))
}

/// Fills the run with random elements.
///
/// Each entry is nonzero-generated with probability `opts.density` and set
/// to zero otherwise.
pub fn randtest(
    mut res: VecMut<'_>,
    rng: &mut dyn RngCore,
    opts: &RandOptions,
    ctx: &GrCtx,
) -> Status {
    let mut status = Status::SUCCESS;
    for i in 0..res.len() {
        status |= if rng.gen::<f64>() < opts.density {
            ctx.randtest(res.get_mut(i), rng, opts)
        } else {
            ctx.zero(res.get_mut(i))
        };
    }
    status
}

// ============================================================================
// Products
// ============================================================================

/// `res = initial + Σ a_i b_i`, or `initial - Σ a_i b_i` when `subtract`.
///
/// A missing `initial` counts as zero.
pub fn dot(
    res: &mut Elem,
    initial: Option<&Elem>,
    subtract: bool,
    a: VecRef<'_>,
    b: VecRef<'_>,
    ctx: &GrCtx,
) -> Status {
    check_len(a.len(), b.len());
    dot_iter(res, initial, subtract, a.iter().zip(b.iter()), ctx)
}

/// [`dot`] over an arbitrary sequence of factor pairs.
pub(crate) fn dot_iter<'e>(
    res: &mut Elem,
    initial: Option<&Elem>,
    subtract: bool,
    pairs: impl Iterator<Item = (&'e Elem, &'e Elem)>,
    ctx: &GrCtx,
) -> Status {
    let mut sum = ctx.new_elem();
    let mut status = Status::SUCCESS;
    for (x, y) in pairs {
        status |= ctx.addmul(sum.as_elem_mut(), x, y);
    }

    status
        | match (initial, subtract) {
            (None, false) => ctx.swap(res, sum.as_elem_mut()),
            (None, true) => ctx.neg(res, sum.as_elem()),
            (Some(init), false) => ctx.add(res, init, sum.as_elem()),
            (Some(init), true) => ctx.sub(res, init, sum.as_elem()),
        }
}

/// `res_i += c · src_i`, with the scalar on the left.
pub fn scalar_addmul(mut res: VecMut<'_>, src: VecRef<'_>, c: &Elem, ctx: &GrCtx) -> Status {
    check_len(res.len(), src.len());
    (0..res.len())
        .map(|i| ctx.addmul(res.get_mut(i), c, src.get(i)))
        .collect()
}

/// [`scalar_addmul`] between two non-overlapping runs of the same buffer:
/// `buf[dst + k] += c · buf[src + k]` for `k < len`.
pub(crate) fn scalar_addmul_within(
    buf: &mut ElemBuf,
    dst: usize,
    src: usize,
    len: usize,
    c: &Elem,
    ctx: &GrCtx,
) -> Status {
    assert!(
        dst + len <= src || src + len <= dst,
        "overlapping runs in scalar_addmul_within"
    );
    (0..len)
        .map(|k| {
            let (d, s) = buf.pair_mut(dst + k, src + k);
            ctx.addmul(d, c, s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::{Ball, BallRing, Nmod};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn buf_si(values: &[i64], ctx: &GrCtx) -> ElemBuf {
        let mut buf = init(values.len(), ctx);
        for (i, &v) in values.iter().enumerate() {
            assert!(ctx.set_si(buf.get_mut(i), v).is_success());
        }
        buf
    }

    #[test]
    fn test_add_sub_neg() {
        let ctx = GrCtx::new(Nmod::new(7).unwrap());
        let a = buf_si(&[1, 2, 3], &ctx);
        let b = buf_si(&[6, 6, 6], &ctx);
        let mut r = init(3, &ctx);
        let (av, bv) = (VecRef::whole(&a), VecRef::whole(&b));

        assert!(add(VecMut::whole(&mut r), av, bv, &ctx).is_success());
        assert_eq!(r.as_slice::<u64>(), Some(&[0u64, 1, 2][..]));

        assert!(sub(VecMut::whole(&mut r), av, bv, &ctx).is_success());
        assert_eq!(r.as_slice::<u64>(), Some(&[2u64, 3, 4][..]));

        assert!(neg(VecMut::whole(&mut r), VecRef::whole(&a), &ctx).is_success());
        assert_eq!(r.as_slice::<u64>(), Some(&[6u64, 5, 4][..]));

        assert!(zero(VecMut::whole(&mut r), &ctx).is_success());
        assert_eq!(is_zero(VecRef::whole(&r), &ctx), Truth::True);
    }

    #[test]
    fn test_subrange_views() {
        let ctx = GrCtx::new(Nmod::new(11).unwrap());
        let src = buf_si(&[1, 2, 3, 4], &ctx);
        let mut dst = init(4, &ctx);
        let status = set(VecMut::new(&mut dst, 1, 2), VecRef::new(&src, 2, 2), &ctx);
        assert!(status.is_success());
        assert_eq!(dst.as_slice::<u64>(), Some(&[0u64, 3, 4, 0][..]));
    }

    #[test]
    #[should_panic(expected = "exceeds buffer")]
    fn test_view_out_of_bounds() {
        let ctx = GrCtx::new(Nmod::new(11).unwrap());
        let buf = init(3, &ctx);
        let _ = VecRef::new(&buf, 2, 2);
    }

    #[test]
    fn test_dot_variants() {
        let ctx = GrCtx::new(Nmod::new(101).unwrap());
        let a = buf_si(&[1, 2, 3], &ctx);
        let b = buf_si(&[4, 5, 6], &ctx);
        let seed = buf_si(&[100], &ctx);
        let mut r = ctx.new_elem();

        let (a, b) = (VecRef::whole(&a), VecRef::whole(&b));
        assert!(dot(r.as_elem_mut(), None, false, a, b, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&32));

        assert!(dot(r.as_elem_mut(), Some(seed.get(0)), false, a, b, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&31));

        assert!(dot(r.as_elem_mut(), Some(seed.get(0)), true, a, b, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&68));

        assert!(dot(r.as_elem_mut(), None, true, a, b, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&69));
    }

    #[test]
    fn test_dot_empty_is_initial() {
        let ctx = GrCtx::new(Nmod::new(13).unwrap());
        let empty = init(0, &ctx);
        let seed = buf_si(&[5], &ctx);
        let mut r = ctx.new_elem();
        let e = VecRef::whole(&empty);
        assert!(dot(r.as_elem_mut(), Some(seed.get(0)), false, e, e, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&5));
        assert!(dot(r.as_elem_mut(), None, false, e, e, &ctx).is_success());
        assert_eq!(r.downcast_ref::<u64>(), Some(&0));
    }

    #[test]
    fn test_scalar_addmul() {
        let ctx = GrCtx::new(Nmod::new(101).unwrap());
        let mut res = buf_si(&[1, 2, 3], &ctx);
        let src = buf_si(&[4, 5, 60], &ctx);
        let c = buf_si(&[2], &ctx);
        let status = scalar_addmul(VecMut::whole(&mut res), VecRef::whole(&src), c.get(0), &ctx);
        assert!(status.is_success());
        assert_eq!(res.as_slice::<u64>(), Some(&[9u64, 12, 22][..]));
    }

    #[test]
    fn test_scalar_addmul_within() {
        let ctx = GrCtx::new(Nmod::new(101).unwrap());
        let mut buf = buf_si(&[1, 2, 10, 20], &ctx);
        let c = buf_si(&[3], &ctx);
        let status = scalar_addmul_within(&mut buf, 2, 0, 2, c.get(0), &ctx);
        assert!(status.is_success());
        assert_eq!(buf.as_slice::<u64>(), Some(&[1u64, 2, 13, 26][..]));
    }

    #[test]
    fn test_equal_scans_past_undecided() {
        let ctx = GrCtx::new(BallRing::new());
        let mut a = init(2, &ctx);
        let mut b = init(2, &ctx);
        // Entry 0: overlapping inexact balls, undecidable.
        assert!(ctx.set_si(a.get_mut(0), 1).is_success());
        assert!(ctx.set_si(b.get_mut(0), 1).is_success());
        *crate::elem::cast_mut::<Ball>(a.get_mut(0)) = Ball::new(1.0, 0.5);
        // Entry 1: exact and different.
        assert!(ctx.set_si(a.get_mut(1), 2).is_success());
        assert!(ctx.set_si(b.get_mut(1), 3).is_success());

        assert_eq!(equal(VecRef::whole(&a), VecRef::whole(&b), &ctx), Truth::False);
        assert_eq!(
            equal(VecRef::new(&a, 0, 1), VecRef::new(&b, 0, 1), &ctx),
            Truth::UNKNOWN
        );
    }

    #[test]
    fn test_randtest_density_zero() {
        let ctx = GrCtx::new(Nmod::new(1_000_003).unwrap());
        let mut buf = init(16, &ctx);
        let mut rng = StdRng::seed_from_u64(7);
        let opts = RandOptions::default().with_density(0.0);
        assert!(randtest(VecMut::whole(&mut buf), &mut rng, &opts, &ctx).is_success());
        assert_eq!(is_zero(VecRef::whole(&buf), &ctx), Truth::True);
    }

    #[test]
    fn test_swap_runs() {
        let ctx = GrCtx::new(Nmod::new(11).unwrap());
        let mut a = buf_si(&[1, 2], &ctx);
        let mut b = buf_si(&[3, 4], &ctx);
        assert!(swap(VecMut::whole(&mut a), VecMut::whole(&mut b), &ctx).is_success());
        assert_eq!(a.as_slice::<u64>(), Some(&[3u64, 4][..]));
        assert_eq!(b.as_slice::<u64>(), Some(&[1u64, 2][..]));
    }
}
