//! Erased element storage.
//!
//! An element is opaque outside its ring: algorithms only see [`Elem`]
//! (`dyn Any + Send + Sync`) and hand it back to the owning context. Storage
//! comes in two shapes:
//!
//! | Type | Holds | Used for |
//! |------|-------|----------|
//! | [`ElemBuf`] | `len` contiguous elements, stride `elem_size` | vectors, matrix entries |
//! | [`GrElem`] | one element | temporaries inside algorithms |
//!
//! Both are allocated by a context ([`GrCtx::new_buf`], [`GrCtx::new_elem`])
//! and release their elements when dropped. An element lives exactly as long
//! as the buffer holding it.
//!
//! [`GrCtx::new_buf`]: crate::GrCtx::new_buf
//! [`GrCtx::new_elem`]: crate::GrCtx::new_elem

use core::any::{Any, TypeId};
use core::fmt;

/// An erased ring element.
pub type Elem = dyn Any + Send + Sync;

/// Downcasts an erased element to its concrete representation.
///
/// # Panics
///
/// Panics when `x` belongs to a ring of another kind: mixing elements across
/// contexts is a contract violation, not a data condition.
#[inline]
pub(crate) fn cast_ref<T: Any>(x: &Elem) -> &T {
    match x.downcast_ref::<T>() {
        Some(v) => v,
        None => foreign_element::<T>(),
    }
}

/// Mutable counterpart of [`cast_ref`].
#[inline]
pub(crate) fn cast_mut<T: Any>(x: &mut Elem) -> &mut T {
    match x.downcast_mut::<T>() {
        Some(v) => v,
        None => foreign_element::<T>(),
    }
}

#[cold]
#[inline(never)]
fn foreign_element<T>() -> ! {
    panic!(
        "element does not belong to this ring context (expected {})",
        core::any::type_name::<T>()
    )
}

// ============================================================================
// ElemBuf
// ============================================================================

/// Contiguous storage, erased over the element type.
trait ErasedVec: Send + Sync {
    fn len(&self) -> usize;
    fn get(&self, i: usize) -> &Elem;
    fn get_mut(&mut self, i: usize) -> &mut Elem;
    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Elem, &mut Elem);
    fn swap(&mut self, i: usize, j: usize);
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> ErasedVec for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, i: usize) -> &Elem {
        &self[i]
    }

    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut Elem {
        &mut self[i]
    }

    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Elem, &mut Elem) {
        assert_ne!(i, j, "pair_mut requires two distinct positions");
        if i < j {
            let (lo, hi) = self.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A fixed-stride run of elements of one ring kind.
pub struct ElemBuf {
    data: Box<dyn ErasedVec>,
    stride: usize,
    elem_type: TypeId,
    owner: usize,
}

impl ElemBuf {
    pub(crate) fn from_vec<T: Any + Send + Sync>(data: Vec<T>) -> Self {
        Self {
            data: Box::new(data),
            stride: core::mem::size_of::<T>(),
            elem_type: TypeId::of::<T>(),
            owner: 0,
        }
    }

    /// Tags the buffer with the identity of the allocating context.
    pub(crate) fn with_owner(mut self, owner: usize) -> Self {
        self.owner = owner;
        self
    }

    /// Identity of the allocating context (0 when untagged).
    #[inline]
    pub(crate) fn owner(&self) -> usize {
        self.owner
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per element.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `TypeId` of the element representation.
    #[inline]
    #[must_use]
    pub fn elem_type(&self) -> TypeId {
        self.elem_type
    }

    /// Element at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> &Elem {
        self.data.get(i)
    }

    /// Mutable element at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> &mut Elem {
        self.data.get_mut(i)
    }

    /// Two distinct elements of the same buffer, both mutable.
    ///
    /// # Panics
    ///
    /// Panics if `i == j` or either index is out of bounds.
    #[inline]
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Elem, &mut Elem) {
        self.data.pair_mut(i, j)
    }

    /// Exchanges the elements at `i` and `j` in place.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.data.swap(i, j);
    }

    /// Typed view of the buffer, if it holds elements of type `T`.
    #[must_use]
    pub fn as_slice<T: Any>(&self) -> Option<&[T]> {
        self.data
            .as_any()
            .downcast_ref::<Vec<T>>()
            .map(Vec::as_slice)
    }
}

impl fmt::Debug for ElemBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElemBuf")
            .field("len", &self.len())
            .field("stride", &self.stride)
            .finish()
    }
}

// ============================================================================
// GrElem
// ============================================================================

/// A single heap-allocated element, typically an algorithm temporary.
pub struct GrElem(Box<Elem>);

impl GrElem {
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow as an erased element.
    #[inline]
    #[must_use]
    pub fn as_elem(&self) -> &Elem {
        &*self.0
    }

    /// Mutably borrow as an erased element.
    #[inline]
    pub fn as_elem_mut(&mut self) -> &mut Elem {
        &mut *self.0
    }

    /// Typed view of the element, if it is a `T`.
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for GrElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GrElem(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buf_layout() {
        let buf = ElemBuf::from_vec(vec![1u64, 2, 3]);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.stride(), 8);
        assert_eq!(buf.elem_type(), TypeId::of::<u64>());
        assert_eq!(buf.as_slice::<u64>(), Some(&[1u64, 2, 3][..]));
        assert!(buf.as_slice::<u32>().is_none());
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut buf = ElemBuf::from_vec(vec![10u64, 20, 30]);
        {
            let (a, b) = buf.pair_mut(0, 2);
            assert_eq!(cast_ref::<u64>(a), &10);
            assert_eq!(cast_ref::<u64>(b), &30);
        }
        {
            let (a, b) = buf.pair_mut(2, 1);
            *cast_mut::<u64>(a) += 1;
            *cast_mut::<u64>(b) += 2;
        }
        assert_eq!(buf.as_slice::<u64>(), Some(&[10u64, 22, 31][..]));
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_pair_mut_rejects_same_index() {
        let mut buf = ElemBuf::from_vec(vec![1u64, 2]);
        let _ = buf.pair_mut(1, 1);
    }

    #[test]
    fn test_swap_in_place() {
        let mut buf = ElemBuf::from_vec(vec![String::from("a"), String::from("b")]);
        buf.swap(0, 1);
        assert_eq!(
            buf.as_slice::<String>().map(|s| s.join("")),
            Some(String::from("ba"))
        );
    }

    #[test]
    fn test_elem_downcast() {
        let e = GrElem::new(5u64);
        assert_eq!(e.downcast_ref::<u64>(), Some(&5));
        assert_eq!(e.downcast_ref::<i64>(), None);
    }
}
