//! Integers modulo a word-size modulus.
//!
//! Residues are stored reduced, in `[0, n)`. Products go through `u128`, so
//! any modulus below `2^63` is supported without overflow.
//!
//! # Example
//!
//! ```
//! use generic_rings::{GrCtx, Status, rings::Nmod};
//!
//! let ctx = GrCtx::new(Nmod::new(10).unwrap());
//! let mut x = ctx.new_elem();
//! let mut y = ctx.new_elem();
//! assert!(ctx.set_si(x.as_elem_mut(), 3).is_success());
//! assert!(ctx.inv(y.as_elem_mut(), x.as_elem()).is_success());
//! assert_eq!(ctx.elem_to_string(y.as_elem()), "7");
//!
//! assert!(ctx.set_si(x.as_elem_mut(), 4).is_success());
//! assert_eq!(ctx.inv(y.as_elem_mut(), x.as_elem()), Status::DOMAIN);
//! ```

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use rand::{Rng, RngCore};

use crate::ctx::{CtxFlags, Ring};
use crate::error::{GrError, GrResult};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

/// Largest supported modulus (exclusive).
pub const MODULUS_LIMIT: u64 = 1 << 63;

/// The ring `Z/nZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nmod {
    n: u64,
}

impl Nmod {
    /// The integers modulo `n`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] unless `1 <= n < 2^63`.
    pub fn new(n: u64) -> GrResult<Self> {
        if n == 0 || n >= MODULUS_LIMIT {
            return Err(GrError::Domain);
        }
        Ok(Self { n })
    }

    /// The modulus `n`.
    #[inline]
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.n
    }

    #[inline]
    fn reduce_i128(&self, v: i128) -> u64 {
        // rem_euclid is in [0, n) and n < 2^63.
        v.rem_euclid(i128::from(self.n)) as u64
    }

    #[inline]
    fn reduce_bigint(&self, v: &BigInt) -> Option<u64> {
        v.mod_floor(&BigInt::from(self.n)).to_u64()
    }

    #[inline]
    fn mul_mod(&self, x: u64, y: u64) -> u64 {
        ((u128::from(x) * u128::from(y)) % u128::from(self.n)) as u64
    }

    #[inline]
    fn add_mod(&self, x: u64, y: u64) -> u64 {
        // Both operands are below 2^63: the sum cannot overflow.
        let s = x + y;
        if s >= self.n {
            s - self.n
        } else {
            s
        }
    }

    fn inv_mod(&self, x: u64) -> Option<u64> {
        let n = i128::from(self.n);
        let g = i128::from(x).extended_gcd(&n);
        (g.gcd == 1).then(|| g.x.rem_euclid(n) as u64)
    }

    /// Distance from zero in the symmetric residue system.
    #[inline]
    fn symmetric_size(&self, x: u64) -> u64 {
        x.min(self.n - x)
    }
}

impl Ring for Nmod {
    type Elem = u64;

    fn flags(&self) -> CtxFlags {
        CtxFlags::FINITE | CtxFlags::EXACT
    }

    fn write_ctx(&self, out: &mut GrStream) -> Status {
        out.write("Integers mod ");
        out.write_ui(self.n);
        out.write(" (nmod)");
        Status::SUCCESS
    }

    fn init(&self) -> u64 {
        0
    }

    fn set(&self, res: &mut u64, x: &u64) -> Status {
        *res = *x;
        Status::SUCCESS
    }

    fn zero(&self, res: &mut u64) -> Status {
        *res = 0;
        Status::SUCCESS
    }

    fn one(&self, res: &mut u64) -> Status {
        *res = 1 % self.n;
        Status::SUCCESS
    }

    fn set_si(&self, res: &mut u64, v: i64) -> Status {
        *res = self.reduce_i128(i128::from(v));
        Status::SUCCESS
    }

    fn set_ui(&self, res: &mut u64, v: u64) -> Status {
        *res = v % self.n;
        Status::SUCCESS
    }

    fn set_bigint(&self, res: &mut u64, v: &BigInt) -> Status {
        match self.reduce_bigint(v) {
            Some(r) => {
                *res = r;
                Status::SUCCESS
            }
            None => Status::UNABLE,
        }
    }

    /// `p/q` maps to `p · q^-1`; a denominator sharing a factor with `n`
    /// has no image.
    fn set_rational(&self, res: &mut u64, v: &BigRational) -> Status {
        let (Some(p), Some(q)) = (self.reduce_bigint(v.numer()), self.reduce_bigint(v.denom()))
        else {
            return Status::UNABLE;
        };
        match self.inv_mod(q) {
            Some(q_inv) => {
                *res = self.mul_mod(p, q_inv);
                Status::SUCCESS
            }
            None => Status::DOMAIN,
        }
    }

    fn is_zero(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == 0)
    }

    fn is_one(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == 1 % self.n)
    }

    fn is_neg_one(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == self.n - 1)
    }

    fn equal(&self, x: &u64, y: &u64) -> Truth {
        Truth::from_bool(x == y)
    }

    fn neg(&self, res: &mut u64, x: &u64) -> Status {
        *res = if *x == 0 { 0 } else { self.n - *x };
        Status::SUCCESS
    }

    fn add(&self, res: &mut u64, x: &u64, y: &u64) -> Status {
        *res = self.add_mod(*x, *y);
        Status::SUCCESS
    }

    fn sub(&self, res: &mut u64, x: &u64, y: &u64) -> Status {
        *res = if x >= y { x - y } else { x + (self.n - y) };
        Status::SUCCESS
    }

    fn mul(&self, res: &mut u64, x: &u64, y: &u64) -> Status {
        *res = self.mul_mod(*x, *y);
        Status::SUCCESS
    }

    fn addmul(&self, res: &mut u64, x: &u64, y: &u64) -> Status {
        *res = self.add_mod(*res, self.mul_mod(*x, *y));
        Status::SUCCESS
    }

    fn inv(&self, res: &mut u64, x: &u64) -> Status {
        match self.inv_mod(*x) {
            Some(r) => {
                *res = r;
                Status::SUCCESS
            }
            None => Status::DOMAIN,
        }
    }

    fn randtest(&self, res: &mut u64, rng: &mut dyn RngCore, opts: &RandOptions) -> Status {
        let m = opts.magnitude();
        self.set_si(res, rng.gen_range(-m..=m))
    }

    fn write(&self, out: &mut GrStream, x: &u64) -> Status {
        out.write_ui(*x);
        Status::SUCCESS
    }

    fn cmp_repr(&self, x: &u64, y: &u64) -> Ordering {
        self.symmetric_size(*x).cmp(&self.symmetric_size(*y))
    }
}
