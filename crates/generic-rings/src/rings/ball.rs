//! Real numbers as midpoint-radius balls.
//!
//! A [`Ball`] `[m +/- r]` stands for some real number in `[m - r, m + r]`.
//! Arithmetic widens the radius to cover every rounding error, so results
//! are always enclosures. Exact inputs that combine without rounding stay
//! exact (radius zero).
//!
//! Predicates only answer when the enclosures prove the answer:
//!
//! | Balls | `equal` |
//! |-------|---------|
//! | both exact | decided by the midpoints |
//! | disjoint | `False` |
//! | overlapping, not both exact | undecided (`Unable`) |
//!
//! This makes the ring the reference case for row reduction with an
//! undecidable zero test.

use core::cmp::Ordering;
use core::fmt::Write as _;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};
use rand::{Rng, RngCore};

use crate::ctx::{CtxFlags, Ring};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

/// Integers up to this magnitude are exactly representable.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// An enclosure `[mid - rad, mid + rad]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ball {
    /// Midpoint.
    pub mid: f64,
    /// Radius, never negative.
    pub rad: f64,
}

impl Ball {
    /// The ball `[mid +/- |rad|]`.
    #[inline]
    #[must_use]
    pub fn new(mid: f64, rad: f64) -> Self {
        Self {
            mid,
            rad: rad.abs(),
        }
    }

    /// The exact value `mid`.
    #[inline]
    #[must_use]
    pub const fn exact(mid: f64) -> Self {
        Self { mid, rad: 0.0 }
    }

    /// Returns true if the radius is zero.
    #[inline]
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.rad == 0.0
    }

    /// Returns true if zero lies in the ball.
    #[inline]
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.mid.abs() <= self.rad
    }

    #[inline]
    fn overlaps(&self, other: &Ball) -> bool {
        (self.mid - other.mid).abs() <= self.rad + other.rad
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.mid.is_finite() && self.rad.is_finite()
    }
}

/// Rounds a radius bound upward.
#[inline]
fn round_up(r: f64) -> f64 {
    if r == 0.0 {
        0.0
    } else {
        r * (1.0 + 4.0 * f64::EPSILON) + f64::MIN_POSITIVE
    }
}

/// `a + b` with the exact rounding error of the floating-point sum.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Stores `ball` into `res`, reporting `Unable` if it escaped the finite
/// range.
#[inline]
fn store(res: &mut Ball, ball: Ball) -> Status {
    *res = ball;
    if ball.is_finite() {
        Status::SUCCESS
    } else {
        Status::UNABLE
    }
}

fn from_i128(v: i128) -> Ball {
    let mid = v as f64;
    if mid.abs() < EXACT_INT_LIMIT {
        Ball::exact(mid)
    } else {
        let err = (v - mid as i128).unsigned_abs() as f64;
        Ball::new(mid, round_up(err))
    }
}

/// The real line with ball arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallRing;

impl BallRing {
    /// The real numbers.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn compare_with(x: &Ball, y: &Ball) -> Truth {
        if x.is_exact() && y.is_exact() {
            Truth::from_bool(x.mid == y.mid)
        } else if !x.overlaps(y) {
            Truth::False
        } else {
            Truth::UNKNOWN
        }
    }
}

impl Ring for BallRing {
    type Elem = Ball;

    fn flags(&self) -> CtxFlags {
        CtxFlags::EMPTY
    }

    fn write_ctx(&self, out: &mut GrStream) -> Status {
        out.write("Real numbers (ball)");
        Status::SUCCESS
    }

    fn init(&self) -> Ball {
        Ball::default()
    }

    fn set(&self, res: &mut Ball, x: &Ball) -> Status {
        *res = *x;
        Status::SUCCESS
    }

    fn zero(&self, res: &mut Ball) -> Status {
        *res = Ball::exact(0.0);
        Status::SUCCESS
    }

    fn one(&self, res: &mut Ball) -> Status {
        *res = Ball::exact(1.0);
        Status::SUCCESS
    }

    fn set_si(&self, res: &mut Ball, v: i64) -> Status {
        store(res, from_i128(i128::from(v)))
    }

    fn set_ui(&self, res: &mut Ball, v: u64) -> Status {
        store(res, from_i128(i128::from(v)))
    }

    fn set_bigint(&self, res: &mut Ball, v: &BigInt) -> Status {
        if let Some(small) = v.to_i128() {
            return store(res, from_i128(small));
        }
        let mid = v.to_f64().unwrap_or(f64::INFINITY);
        store(res, Ball::new(mid, round_up(mid.abs() * f64::EPSILON)))
    }

    fn set_rational(&self, res: &mut Ball, v: &BigRational) -> Status {
        if v.denom().is_one() {
            return self.set_bigint(res, v.numer());
        }
        let (p, q) = match (v.numer().to_f64(), v.denom().to_f64()) {
            (Some(p), Some(q)) => (p, q),
            _ => return Status::UNABLE,
        };
        let mid = p / q;
        // Error of each conversion plus the division, relative to |mid|.
        store(res, Ball::new(mid, round_up(3.0 * mid.abs() * f64::EPSILON)))
    }

    fn is_zero(&self, x: &Ball) -> Truth {
        Self::compare_with(x, &Ball::exact(0.0))
    }

    fn is_one(&self, x: &Ball) -> Truth {
        Self::compare_with(x, &Ball::exact(1.0))
    }

    fn is_neg_one(&self, x: &Ball) -> Truth {
        Self::compare_with(x, &Ball::exact(-1.0))
    }

    fn equal(&self, x: &Ball, y: &Ball) -> Truth {
        Self::compare_with(x, y)
    }

    fn neg(&self, res: &mut Ball, x: &Ball) -> Status {
        *res = Ball::new(-x.mid, x.rad);
        Status::SUCCESS
    }

    fn add(&self, res: &mut Ball, x: &Ball, y: &Ball) -> Status {
        let (mid, err) = two_sum(x.mid, y.mid);
        store(res, Ball::new(mid, round_up(x.rad + y.rad + err.abs())))
    }

    fn sub(&self, res: &mut Ball, x: &Ball, y: &Ball) -> Status {
        let (mid, err) = two_sum(x.mid, -y.mid);
        store(res, Ball::new(mid, round_up(x.rad + y.rad + err.abs())))
    }

    fn mul(&self, res: &mut Ball, x: &Ball, y: &Ball) -> Status {
        let mid = x.mid * y.mid;
        let err = x.mid.mul_add(y.mid, -mid);
        let rad = x.mid.abs() * y.rad + y.mid.abs() * x.rad + x.rad * y.rad + err.abs();
        store(res, Ball::new(mid, round_up(rad)))
    }

    /// Undecided when the ball contains zero.
    fn inv(&self, res: &mut Ball, x: &Ball) -> Status {
        if x.contains_zero() {
            return Status::UNABLE;
        }
        let m = x.mid.abs();
        let mid = 1.0 / x.mid;
        // 1 - x.mid * mid, exactly.
        let residual = (-mid).mul_add(x.mid, 1.0);
        let rad = x.rad / (m * (m - x.rad)) + residual.abs() / m;
        store(res, Ball::new(mid, round_up(rad)))
    }

    fn randtest(&self, res: &mut Ball, rng: &mut dyn RngCore, opts: &RandOptions) -> Status {
        let m = opts.magnitude();
        let mid = rng.gen_range(-m..=m) as f64 + rng.gen::<f64>();
        *res = Ball::new(mid, (mid.abs() + 1.0) * 1e-12);
        Status::SUCCESS
    }

    /// Exact balls print as their value, others as `[mid +/- rad]`.
    fn write(&self, out: &mut GrStream, x: &Ball) -> Status {
        if !x.is_exact() {
            let _ = write!(out, "[{} +/- {:.3e}]", x.mid, x.rad);
        } else if x.mid.fract() == 0.0 && x.mid.abs() < EXACT_INT_LIMIT {
            out.write_si(x.mid as i64);
        } else {
            let _ = write!(out, "{}", x.mid);
        }
        Status::SUCCESS
    }

    /// Larger magnitude first, as in partial pivoting.
    fn cmp_repr(&self, x: &Ball, y: &Ball) -> Ordering {
        y.mid.abs().total_cmp(&x.mid.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::GrCtx;

    #[test]
    fn test_exact_arithmetic_stays_exact() {
        let r = BallRing::new();
        let mut x = r.init();
        assert!(r.set_si(&mut x, 3).is_success());
        let mut y = r.init();
        assert!(r.mul(&mut y, &x, &x).is_success());
        assert_eq!(y, Ball::exact(9.0));
        let nine = y;
        assert!(r.sub(&mut y, &nine, &Ball::exact(9.0)).is_success());
        assert_eq!(r.is_zero(&y), Truth::True);
    }

    #[test]
    fn test_rounding_widens_radius() {
        let r = BallRing::new();
        let mut x = r.init();
        assert!(r.add(&mut x, &Ball::exact(0.1), &Ball::exact(0.2)).is_success());
        assert!(!x.is_exact());
        assert!(x.rad < 1e-15);
        // The double nearest 0.3 lies just outside the enclosure of 0.1 + 0.2.
        assert_eq!(r.equal(&x, &Ball::exact(0.3)), Truth::False);
        assert_eq!(r.equal(&x, &Ball::new(0.3, 1e-16)), Truth::UNKNOWN);
    }

    #[test]
    fn test_predicates_under_uncertainty() {
        let r = BallRing::new();
        let fuzzy_zero = Ball::new(0.0, 1e-10);
        assert_eq!(r.is_zero(&fuzzy_zero), Truth::UNKNOWN);
        assert_eq!(r.is_one(&fuzzy_zero), Truth::False);
        assert_eq!(r.is_zero(&Ball::new(1.0, 0.5)), Truth::False);
        assert_eq!(r.equal(&Ball::new(1.0, 0.1), &Ball::new(1.05, 0.1)), Truth::UNKNOWN);
        assert_eq!(r.is_neg_one(&Ball::exact(-1.0)), Truth::True);
    }

    #[test]
    fn test_inverse() {
        let r = BallRing::new();
        let mut x = r.init();
        assert_eq!(r.inv(&mut x, &Ball::new(0.5, 1.0)), Status::UNABLE);
        assert!(r.inv(&mut x, &Ball::exact(4.0)).is_success());
        assert_eq!(x, Ball::exact(0.25));
        assert!(r.inv(&mut x, &Ball::exact(3.0)).is_success());
        assert!((x.mid * 3.0 - 1.0).abs() <= 3.0 * x.rad + f64::EPSILON);
    }

    #[test]
    fn test_overflow_is_unable() {
        let r = BallRing::new();
        let mut x = r.init();
        let big = Ball::exact(f64::MAX);
        assert_eq!(r.mul(&mut x, &big, &big), Status::UNABLE);
    }

    #[test]
    fn test_write_and_describe() {
        let ctx = GrCtx::new(BallRing::new());
        assert_eq!(ctx.describe(), "Real numbers (ball)");
        let r = BallRing::new();
        let mut out = GrStream::new();
        assert!(r.write(&mut out, &Ball::exact(-4.0)).is_success());
        out.write(" ");
        assert!(r.write(&mut out, &Ball::exact(0.5)).is_success());
        out.write(" ");
        assert!(r.write(&mut out, &Ball::new(1.0, 0.25)).is_success());
        assert_eq!(out.as_str(), "-4 0.5 [1 +/- 2.500e-1]");
    }

    #[test]
    fn test_cmp_repr_prefers_magnitude() {
        let r = BallRing::new();
        assert_eq!(r.cmp_repr(&Ball::exact(-5.0), &Ball::exact(2.0)), Ordering::Less);
        assert_eq!(r.cmp_repr(&Ball::exact(1.0), &Ball::exact(-1.0)), Ordering::Equal);
    }
}
