//! Adapter from a typed [`Ring`] impl to the erased [`Methods`] table.

use core::any::TypeId;
use core::cmp::Ordering;
use core::marker::PhantomData;

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::RngCore;

use super::{GrCtx, Methods, Ring};
use crate::elem::{cast_mut, cast_ref, Elem, ElemBuf, GrElem};
use crate::randtest::RandOptions;
use crate::status::{Status, Truth};
use crate::stream::GrStream;

/// Erased method table for ring kind `R`.
///
/// Zero-sized: all per-instance state lives in the context's auxiliary data.
pub(crate) struct Dispatch<R>(PhantomData<fn() -> R>);

impl<R: Ring> Dispatch<R> {
    pub(crate) const fn new() -> Self {
        Self(PhantomData)
    }

    #[inline]
    fn ring(ctx: &GrCtx) -> &R {
        match ctx.aux::<R>() {
            Some(ring) => ring,
            None => panic!(
                "context does not belong to ring kind {}",
                core::any::type_name::<R>()
            ),
        }
    }
}

impl<R: Ring> Methods for Dispatch<R> {
    fn kind_name(&self) -> &'static str {
        core::any::type_name::<R>()
    }

    fn elem_size(&self) -> usize {
        core::mem::size_of::<R::Elem>()
    }

    fn elem_type(&self) -> TypeId {
        TypeId::of::<R::Elem>()
    }

    fn vec_init(&self, len: usize, ctx: &GrCtx) -> ElemBuf {
        let ring = Self::ring(ctx);
        ElemBuf::from_vec((0..len).map(|_| ring.init()).collect::<Vec<R::Elem>>())
            .with_owner(ctx.id())
    }

    fn elem_init(&self, ctx: &GrCtx) -> GrElem {
        GrElem::new(Self::ring(ctx).init())
    }

    fn write_ctx(&self, out: &mut GrStream, ctx: &GrCtx) -> Status {
        Self::ring(ctx).write_ctx(out)
    }

    fn swap(&self, x: &mut Elem, y: &mut Elem, _ctx: &GrCtx) -> Status {
        core::mem::swap(cast_mut::<R::Elem>(x), cast_mut::<R::Elem>(y));
        Status::SUCCESS
    }

    fn set(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).set(cast_mut(res), cast_ref(x))
    }

    fn zero(&self, res: &mut Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).zero(cast_mut(res))
    }

    fn one(&self, res: &mut Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).one(cast_mut(res))
    }

    fn set_si(&self, res: &mut Elem, v: i64, ctx: &GrCtx) -> Status {
        Self::ring(ctx).set_si(cast_mut(res), v)
    }

    fn set_ui(&self, res: &mut Elem, v: u64, ctx: &GrCtx) -> Status {
        Self::ring(ctx).set_ui(cast_mut(res), v)
    }

    fn set_bigint(&self, res: &mut Elem, v: &BigInt, ctx: &GrCtx) -> Status {
        Self::ring(ctx).set_bigint(cast_mut(res), v)
    }

    fn set_rational(&self, res: &mut Elem, v: &BigRational, ctx: &GrCtx) -> Status {
        Self::ring(ctx).set_rational(cast_mut(res), v)
    }

    fn is_zero(&self, x: &Elem, ctx: &GrCtx) -> Truth {
        Self::ring(ctx).is_zero(cast_ref(x))
    }

    fn is_one(&self, x: &Elem, ctx: &GrCtx) -> Truth {
        Self::ring(ctx).is_one(cast_ref(x))
    }

    fn is_neg_one(&self, x: &Elem, ctx: &GrCtx) -> Truth {
        Self::ring(ctx).is_neg_one(cast_ref(x))
    }

    fn equal(&self, x: &Elem, y: &Elem, ctx: &GrCtx) -> Truth {
        Self::ring(ctx).equal(cast_ref(x), cast_ref(y))
    }

    fn neg(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).neg(cast_mut(res), cast_ref(x))
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).add(cast_mut(res), cast_ref(x), cast_ref(y))
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).sub(cast_mut(res), cast_ref(x), cast_ref(y))
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).mul(cast_mut(res), cast_ref(x), cast_ref(y))
    }

    fn addmul(&self, res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).addmul(cast_mut(res), cast_ref(x), cast_ref(y))
    }

    fn inv(&self, res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).inv(cast_mut(res), cast_ref(x))
    }

    fn randtest(
        &self,
        res: &mut Elem,
        rng: &mut dyn RngCore,
        opts: &RandOptions,
        ctx: &GrCtx,
    ) -> Status {
        Self::ring(ctx).randtest(cast_mut(res), rng, opts)
    }

    fn write(&self, out: &mut GrStream, x: &Elem, ctx: &GrCtx) -> Status {
        Self::ring(ctx).write(out, cast_ref(x))
    }

    fn cmp_repr(&self, x: &Elem, y: &Elem, ctx: &GrCtx) -> Ordering {
        Self::ring(ctx).cmp_repr(cast_ref(x), cast_ref(y))
    }
}
