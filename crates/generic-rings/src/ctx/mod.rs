//! Ring contexts and the operation dispatch protocol.
//!
//! A ring *kind* (integers mod n, rationals, balls, matrices over a ring)
//! implements the typed [`Ring`] trait once. The registry turns that impl
//! into an erased [`Methods`] table, built once per kind and shared by every
//! context of that kind. A [`GrCtx`] pairs the shared table with the
//! per-instance configuration (the modulus, the base ring and dimension, ...)
//! held as opaque auxiliary data.
//!
//! ```text
//!   GrCtx ──┬── elem_size, flags
//!           ├── aux:     Arc<R>            (per instance)
//!           └── methods: &'static Methods  (per kind, from the registry)
//! ```
//!
//! Elements handled through a context must belong to that context. Passing
//! an element of another kind is a contract violation and aborts with a
//! panic; it is never reported as a status.
//!
//! # Example
//!
//! ```
//! use generic_rings::{GrCtx, Truth, rings::Nmod};
//!
//! let ctx = GrCtx::new(Nmod::new(5).unwrap());
//! let mut x = ctx.new_elem();
//! let mut y = ctx.new_elem();
//! assert!(ctx.set_si(x.as_elem_mut(), 3).is_success());
//! assert!(ctx.set_si(y.as_elem_mut(), 2).is_success());
//!
//! let mut sum = ctx.new_elem();
//! assert!(ctx.add(sum.as_elem_mut(), x.as_elem(), y.as_elem()).is_success());
//! assert_eq!(ctx.is_zero(sum.as_elem()), Truth::True);
//! ```

mod dispatch;
pub mod registry;

use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{BitAnd, BitOr};
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::RngCore;

use crate::elem::{Elem, ElemBuf, GrElem};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

use registry::MethodRegistry;

// ============================================================================
// CtxFlags
// ============================================================================

/// Structural properties of a ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtxFlags(u32);

impl CtxFlags {
    /// No properties.
    pub const EMPTY: Self = Self(0);

    /// The ring has finitely many elements.
    pub const FINITE: Self = Self(1);

    /// Equality and zero tests always succeed.
    pub const EXACT: Self = Self(1 << 1);

    /// Raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either operand.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Flags set in both operands.
    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl BitOr for CtxFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for CtxFlags {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Debug for CtxFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::FINITE) {
            set.entry(&"FINITE");
        }
        if self.contains(Self::EXACT) {
            set.entry(&"EXACT");
        }
        set.finish()
    }
}

// ============================================================================
// Ring - the typed per-kind contract
// ============================================================================

/// One ring kind, written against a concrete element type.
///
/// `self` is the per-instance configuration. Implementations never see
/// aliased arguments: the output is always a distinct `&mut` borrow.
///
/// Predicates return [`Truth`]; everything else returns a [`Status`]. An
/// operation the kind cannot perform reports [`Status::UNABLE`].
pub trait Ring: Send + Sync + 'static {
    /// Element representation.
    type Elem: Send + Sync + 'static;

    /// Structural flags of this instance.
    fn flags(&self) -> CtxFlags;

    /// Writes a description of the ring itself.
    fn write_ctx(&self, out: &mut GrStream) -> Status;

    /// Constructs a new element holding zero.
    fn init(&self) -> Self::Elem;

    /// `res = x`.
    fn set(&self, res: &mut Self::Elem, x: &Self::Elem) -> Status;

    /// `res = 0`.
    fn zero(&self, res: &mut Self::Elem) -> Status;

    /// `res = 1`.
    fn one(&self, res: &mut Self::Elem) -> Status;

    /// `res = v` for a small signed integer.
    fn set_si(&self, res: &mut Self::Elem, v: i64) -> Status;

    /// `res = v` for a small unsigned integer.
    fn set_ui(&self, res: &mut Self::Elem, v: u64) -> Status;

    /// `res = v` for an arbitrary-precision integer.
    fn set_bigint(&self, res: &mut Self::Elem, v: &BigInt) -> Status;

    /// `res = v` for an arbitrary-precision rational.
    fn set_rational(&self, res: &mut Self::Elem, v: &BigRational) -> Status;

    /// Is `x` zero?
    fn is_zero(&self, x: &Self::Elem) -> Truth;

    /// Is `x` one?
    fn is_one(&self, x: &Self::Elem) -> Truth;

    /// Is `x` minus one?
    fn is_neg_one(&self, x: &Self::Elem) -> Truth;

    /// Is `x == y`?
    fn equal(&self, x: &Self::Elem, y: &Self::Elem) -> Truth;

    /// `res = -x`.
    fn neg(&self, res: &mut Self::Elem, x: &Self::Elem) -> Status;

    /// `res = x + y`.
    fn add(&self, res: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> Status;

    /// `res = x - y`.
    fn sub(&self, res: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> Status;

    /// `res = x * y`.
    fn mul(&self, res: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> Status;

    /// `res = res + x * y`.
    fn addmul(&self, res: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> Status {
        let mut prod = self.init();
        let mut acc = self.init();
        let mut status = self.mul(&mut prod, x, y);
        status |= self.set(&mut acc, res);
        status |= self.add(res, &acc, &prod);
        status
    }

    /// `res = x^-1`.
    ///
    /// Reports `DOMAIN` when `x` is provably not a unit.
    fn inv(&self, res: &mut Self::Elem, x: &Self::Elem) -> Status {
        let _ = (res, x);
        Status::UNABLE
    }

    /// Fills `res` with a random element for testing.
    fn randtest(&self, res: &mut Self::Elem, rng: &mut dyn RngCore, opts: &RandOptions) -> Status;

    /// Writes the textual form of `x`.
    fn write(&self, out: &mut GrStream, x: &Self::Elem) -> Status;

    /// Representation complexity order used to break pivot ties.
    ///
    /// `Less` means `x` is the preferred (simpler) representation. The order
    /// must be a repeatable total preorder; ties are allowed.
    fn cmp_repr(&self, x: &Self::Elem, y: &Self::Elem) -> Ordering {
        let _ = (x, y);
        Ordering::Equal
    }
}

// ============================================================================
// Methods - the erased per-kind dispatch table
// ============================================================================

/// Erased operation table shared by every context of one ring kind.
///
/// Obtained from the [`MethodRegistry`]; algorithms call it through the
/// forwarding methods on [`GrCtx`].
pub trait Methods: Send + Sync + 'static {
    /// Name of the ring kind.
    fn kind_name(&self) -> &'static str;

    /// Size in bytes of one element.
    fn elem_size(&self) -> usize;

    /// `TypeId` of the element representation.
    fn elem_type(&self) -> core::any::TypeId;

    /// Allocates and constructs `len` contiguous elements.
    fn vec_init(&self, len: usize, ctx: &GrCtx) -> ElemBuf;

    /// Allocates and constructs one element.
    fn elem_init(&self, ctx: &GrCtx) -> GrElem;

    /// Writes a description of the ring.
    fn write_ctx(&self, out: &mut GrStream, ctx: &GrCtx) -> Status;

    /// Exchanges two elements without copying them.
    fn swap(&self, x: &mut Elem, y: &mut Elem, ctx: &GrCtx) -> Status;

    /// `res = x`.
    fn set(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status;
    /// `res = 0`.
    fn zero(&self, res: &mut Elem, ctx: &GrCtx) -> Status;
    /// `res = 1`.
    fn one(&self, res: &mut Elem, ctx: &GrCtx) -> Status;
    /// `res = v`.
    fn set_si(&self, res: &mut Elem, v: i64, ctx: &GrCtx) -> Status;
    /// `res = v`.
    fn set_ui(&self, res: &mut Elem, v: u64, ctx: &GrCtx) -> Status;
    /// `res = v`.
    fn set_bigint(&self, res: &mut Elem, v: &BigInt, ctx: &GrCtx) -> Status;
    /// `res = v`.
    fn set_rational(&self, res: &mut Elem, v: &BigRational, ctx: &GrCtx) -> Status;

    /// Is `x` zero?
    fn is_zero(&self, x: &Elem, ctx: &GrCtx) -> Truth;
    /// Is `x` one?
    fn is_one(&self, x: &Elem, ctx: &GrCtx) -> Truth;
    /// Is `x` minus one?
    fn is_neg_one(&self, x: &Elem, ctx: &GrCtx) -> Truth;
    /// Is `x == y`?
    fn equal(&self, x: &Elem, y: &Elem, ctx: &GrCtx) -> Truth;

    /// `res = -x`.
    fn neg(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status;
    /// `res = x + y`.
    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status;
    /// `res = x - y`.
    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status;
    /// `res = x * y`.
    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status;
    /// `res += x * y`.
    fn addmul(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status;
    /// `res = x^-1`.
    fn inv(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status;

    /// Random element.
    fn randtest(
        &self,
        res: &mut Elem,
        rng: &mut dyn RngCore,
        opts: &RandOptions,
        ctx: &GrCtx,
    ) -> Status;

    /// Textual form of `x`.
    fn write(&self, out: &mut GrStream, x: &Elem, ctx: &GrCtx) -> Status;

    /// Pivot tie-break order.
    fn cmp_repr(&self, x: &Elem, y: &Elem, ctx: &GrCtx) -> Ordering;
}

// ============================================================================
// GrCtx
// ============================================================================

/// Runtime descriptor of one concrete ring.
///
/// Cheap to clone: the auxiliary data is reference counted and the method
/// table is a shared static.
#[derive(Clone)]
pub struct GrCtx {
    elem_size: usize,
    flags: CtxFlags,
    aux: Arc<dyn Any + Send + Sync>,
    methods: &'static dyn Methods,
}

impl GrCtx {
    /// Builds a context for `ring`, using the process-wide registry.
    pub fn new<R: Ring>(ring: R) -> Self {
        Self::with_registry(ring, MethodRegistry::global())
    }

    /// Builds a context for `ring`, taking the method table from `registry`.
    pub fn with_registry<R: Ring>(ring: R, registry: &MethodRegistry) -> Self {
        let methods = registry.methods_for::<R>();
        Self {
            elem_size: methods.elem_size(),
            flags: ring.flags(),
            aux: Arc::new(ring),
            methods,
        }
    }

    /// Bytes per element.
    #[inline]
    #[must_use]
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Structural flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> CtxFlags {
        self.flags
    }

    /// Returns true if the ring is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.flags.contains(CtxFlags::FINITE)
    }

    /// Returns true if predicates over this ring always decide.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.flags.contains(CtxFlags::EXACT)
    }

    /// The shared method table.
    #[inline]
    #[must_use]
    pub fn methods(&self) -> &'static dyn Methods {
        self.methods
    }

    /// The per-instance configuration, if this context is of kind `R`.
    #[must_use]
    pub fn aux<R: Ring>(&self) -> Option<&R> {
        self.aux.downcast_ref::<R>()
    }

    /// Human-readable description of the ring.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = GrStream::new();
        let _ = self.methods.write_ctx(&mut out, self);
        out.into_string()
    }

    /// Writes the ring description to `out`.
    pub fn write_ctx(&self, out: &mut GrStream) -> Status {
        self.methods.write_ctx(out, self)
    }

    /// Allocates one zero element.
    #[must_use]
    pub fn new_elem(&self) -> GrElem {
        self.methods.elem_init(self)
    }

    /// Allocates `len` contiguous zero elements.
    #[must_use]
    pub fn new_buf(&self, len: usize) -> ElemBuf {
        self.methods.vec_init(len, self)
    }

    /// Identity of this context instance, shared by its clones.
    #[inline]
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.aux) as *const () as usize
    }

    /// Debug check that `buf` was allocated by this context or a clone of it.
    #[inline]
    pub(crate) fn debug_assert_owns(&self, buf: &ElemBuf) {
        debug_assert_eq!(
            buf.elem_type(),
            self.methods.elem_type(),
            "element buffer does not belong to ring kind {}",
            self.methods.kind_name()
        );
        debug_assert_eq!(buf.stride(), self.elem_size);
        debug_assert!(
            buf.owner() == self.id(),
            "element buffer belongs to another context of kind {}",
            self.methods.kind_name()
        );
    }

    // ------------------------------------------------------------------------
    // Forwarding element operations
    // ------------------------------------------------------------------------

    /// Exchanges `x` and `y`.
    #[inline]
    pub fn swap(&self, x: &mut Elem, y: &mut Elem) -> Status {
        self.methods.swap(x, y, self)
    }

    /// `res = x`.
    #[inline]
    pub fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        self.methods.set(res, x, self)
    }

    /// `res = 0`.
    #[inline]
    pub fn zero(&self, res: &mut Elem) -> Status {
        self.methods.zero(res, self)
    }

    /// `res = 1`.
    #[inline]
    pub fn one(&self, res: &mut Elem) -> Status {
        self.methods.one(res, self)
    }

    /// `res = v`.
    #[inline]
    pub fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        self.methods.set_si(res, v, self)
    }

    /// `res = v`.
    #[inline]
    pub fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        self.methods.set_ui(res, v, self)
    }

    /// `res = v`.
    #[inline]
    pub fn set_bigint(&self, res: &mut Elem, v: &BigInt) -> Status {
        self.methods.set_bigint(res, v, self)
    }

    /// `res = v`.
    #[inline]
    pub fn set_rational(&self, res: &mut Elem, v: &BigRational) -> Status {
        self.methods.set_rational(res, v, self)
    }

    /// Is `x` zero?
    #[inline]
    pub fn is_zero(&self, x: &Elem) -> Truth {
        self.methods.is_zero(x, self)
    }

    /// Is `x` one?
    #[inline]
    pub fn is_one(&self, x: &Elem) -> Truth {
        self.methods.is_one(x, self)
    }

    /// Is `x` minus one?
    #[inline]
    pub fn is_neg_one(&self, x: &Elem) -> Truth {
        self.methods.is_neg_one(x, self)
    }

    /// Is `x == y`?
    #[inline]
    pub fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        self.methods.equal(x, y, self)
    }

    /// `res = -x`.
    #[inline]
    pub fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        self.methods.neg(res, x, self)
    }

    /// `res = x + y`.
    #[inline]
    pub fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.methods.add(res, x, y, self)
    }

    /// `res = x - y`.
    #[inline]
    pub fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.methods.sub(res, x, y, self)
    }

    /// `res = x * y`.
    #[inline]
    pub fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.methods.mul(res, x, y, self)
    }

    /// `res += x * y`.
    #[inline]
    pub fn addmul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.methods.addmul(res, x, y, self)
    }

    /// `res = x^-1`.
    #[inline]
    pub fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        self.methods.inv(res, x, self)
    }

    /// Random element.
    #[inline]
    pub fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore, opts: &RandOptions) -> Status {
        self.methods.randtest(res, rng, opts, self)
    }

    /// Textual form of `x`.
    #[inline]
    pub fn write(&self, out: &mut GrStream, x: &Elem) -> Status {
        self.methods.write(out, x, self)
    }

    /// Textual form of `x` as an owned string.
    #[must_use]
    pub fn elem_to_string(&self, x: &Elem) -> String {
        let mut out = GrStream::new();
        let _ = self.write(&mut out, x);
        out.into_string()
    }

    /// Pivot tie-break order.
    #[inline]
    #[must_use]
    pub fn cmp_repr(&self, x: &Elem, y: &Elem) -> Ordering {
        self.methods.cmp_repr(x, y, self)
    }
}

impl fmt::Debug for GrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrCtx")
            .field("ring", &self.describe())
            .field("kind", &self.methods.kind_name())
            .field("elem_size", &self.elem_size)
            .field("flags", &self.flags)
            .finish()
    }
}

impl fmt::Display for GrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
