//! The rational field over arbitrary-precision integers.

use core::cmp::Ordering;
use core::fmt::Write as _;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rand::{Rng, RngCore};

use crate::ctx::{CtxFlags, Ring};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

/// The field `Q`, elements are [`BigRational`] in lowest terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalField;

impl RationalField {
    /// The rational field.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Total bit length of numerator and denominator.
    #[inline]
    fn height(x: &BigRational) -> u64 {
        x.numer().bits() + x.denom().bits()
    }
}

impl Ring for RationalField {
    type Elem = BigRational;

    fn flags(&self) -> CtxFlags {
        CtxFlags::EXACT
    }

    fn write_ctx(&self, out: &mut GrStream) -> Status {
        out.write("Rational field (fmpq)");
        Status::SUCCESS
    }

    fn init(&self) -> BigRational {
        BigRational::zero()
    }

    fn set(&self, res: &mut BigRational, x: &BigRational) -> Status {
        res.clone_from(x);
        Status::SUCCESS
    }

    fn zero(&self, res: &mut BigRational) -> Status {
        res.set_zero();
        Status::SUCCESS
    }

    fn one(&self, res: &mut BigRational) -> Status {
        res.set_one();
        Status::SUCCESS
    }

    fn set_si(&self, res: &mut BigRational, v: i64) -> Status {
        *res = BigRational::from_integer(BigInt::from(v));
        Status::SUCCESS
    }

    fn set_ui(&self, res: &mut BigRational, v: u64) -> Status {
        *res = BigRational::from_integer(BigInt::from(v));
        Status::SUCCESS
    }

    fn set_bigint(&self, res: &mut BigRational, v: &BigInt) -> Status {
        *res = BigRational::from_integer(v.clone());
        Status::SUCCESS
    }

    fn set_rational(&self, res: &mut BigRational, v: &BigRational) -> Status {
        res.clone_from(v);
        Status::SUCCESS
    }

    fn is_zero(&self, x: &BigRational) -> Truth {
        Truth::from_bool(x.is_zero())
    }

    fn is_one(&self, x: &BigRational) -> Truth {
        Truth::from_bool(x.is_one())
    }

    fn is_neg_one(&self, x: &BigRational) -> Truth {
        Truth::from_bool(x.is_integer() && x.is_negative() && x.numer().abs().is_one())
    }

    fn equal(&self, x: &BigRational, y: &BigRational) -> Truth {
        Truth::from_bool(x == y)
    }

    fn neg(&self, res: &mut BigRational, x: &BigRational) -> Status {
        *res = -x;
        Status::SUCCESS
    }

    fn add(&self, res: &mut BigRational, x: &BigRational, y: &BigRational) -> Status {
        *res = x + y;
        Status::SUCCESS
    }

    fn sub(&self, res: &mut BigRational, x: &BigRational, y: &BigRational) -> Status {
        *res = x - y;
        Status::SUCCESS
    }

    fn mul(&self, res: &mut BigRational, x: &BigRational, y: &BigRational) -> Status {
        *res = x * y;
        Status::SUCCESS
    }

    fn addmul(&self, res: &mut BigRational, x: &BigRational, y: &BigRational) -> Status {
        *res += x * y;
        Status::SUCCESS
    }

    fn inv(&self, res: &mut BigRational, x: &BigRational) -> Status {
        if x.is_zero() {
            return Status::DOMAIN;
        }
        *res = x.recip();
        Status::SUCCESS
    }

    fn randtest(&self, res: &mut BigRational, rng: &mut dyn RngCore, opts: &RandOptions) -> Status {
        let m = opts.magnitude();
        let p = rng.gen_range(-m..=m);
        let q = rng.gen_range(1..=m);
        *res = BigRational::new(BigInt::from(p), BigInt::from(q));
        Status::SUCCESS
    }

    fn write(&self, out: &mut GrStream, x: &BigRational) -> Status {
        let _ = if x.is_integer() {
            write!(out, "{}", x.numer())
        } else {
            write!(out, "{}/{}", x.numer(), x.denom())
        };
        Status::SUCCESS
    }

    fn cmp_repr(&self, x: &BigRational, y: &BigRational) -> Ordering {
        Self::height(x).cmp(&Self::height(y))
    }
}
