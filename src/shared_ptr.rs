//! SharedPtr: reference-counted shared ownership of a heap object.
//!
//! Layout: the target and its counters live in two separate allocations.
//! The target is a `Box<T>` leaked into a raw pointer; the counters are a
//! `Counts` block with a strong and a weak `UsizeCount`.
//!
//! Lifecycle
//! - Every live `SharedPtr` holds one strong unit. All strong handles
//!   together hold one implicit weak unit.
//! - Strong count reaching zero destroys the target, then returns the
//!   implicit weak unit.
//! - Weak count reaching zero frees the `Counts` block. A `WeakPtr` can
//!   therefore always read the counters, even after the target is gone.
//!
//! Not thread-safe: counters are plain integers and the handle is
//! `!Send`/`!Sync` through its raw pointers.

use crate::count::{Count, UsizeCount};
use crate::weak_ptr::WeakPtr;
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::Deref;
use core::ptr::NonNull;

pub(crate) struct Counts {
    pub(crate) strong: UsizeCount,
    pub(crate) weak: UsizeCount,
}

impl Counts {
    fn new() -> Self {
        Self {
            strong: UsizeCount::new(1),
            // Implicit unit held by the strong handles as a group.
            weak: UsizeCount::new(1),
        }
    }
}

/// The `(target, counts)` pair shared by every handle of one ownership group.
pub(crate) struct RawParts<T: ?Sized> {
    pub(crate) target: NonNull<T>,
    pub(crate) counts: NonNull<Counts>,
}

impl<T: ?Sized> Clone for RawParts<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for RawParts<T> {}

impl<T: ?Sized> RawParts<T> {
    /// Safety: the counts block must still be allocated, which holds while
    /// any strong or weak handle of the group is alive.
    #[inline]
    pub(crate) unsafe fn counts(&self) -> &Counts {
        self.counts.as_ref()
    }

    /// Return one weak unit; frees the counts block if it was the last.
    ///
    /// Safety: the caller must own the weak unit it returns.
    pub(crate) unsafe fn put_weak(self) {
        let last = self.counts().weak.put();
        if last {
            drop(Box::from_raw(self.counts.as_ptr()));
        }
    }
}

/// A reference-counted pointer to a heap object.
///
/// Cloning increments the strong count; dropping decrements it and
/// destroys the target when it reaches zero. An empty (`null`) handle owns
/// nothing and has a strong count of zero.
///
/// Reference cycles between `SharedPtr`s are never collected; break them
/// with [`WeakPtr`].
pub struct SharedPtr<T: ?Sized> {
    pub(crate) raw: Option<RawParts<T>>,
    _owns: PhantomData<T>,
}

/// Allocate `value` and wrap it in a fresh `SharedPtr` with a count of one.
pub fn make_shared<T>(value: T) -> SharedPtr<T> {
    SharedPtr::new(value)
}

impl<T> SharedPtr<T> {
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }
}

impl<T: ?Sized> SharedPtr<T> {
    /// An empty handle.
    pub const fn null() -> Self {
        Self {
            raw: None,
            _owns: PhantomData,
        }
    }

    /// Take ownership of a boxed object with a fresh counter of one.
    pub fn from_box(target: Box<T>) -> Self {
        let target = NonNull::from(Box::leak(target));
        let counts = NonNull::from(Box::leak(Box::new(Counts::new())));
        Self {
            raw: Some(RawParts { target, counts }),
            _owns: PhantomData,
        }
    }

    /// Take ownership of a raw pointer. A null pointer yields an empty handle.
    ///
    /// # Safety
    /// `target` must be null or come from `Box::into_raw`, and nothing else
    /// may own it afterwards.
    pub unsafe fn from_raw(target: *mut T) -> Self {
        match NonNull::new(target) {
            Some(p) => Self::from_box(Box::from_raw(p.as_ptr())),
            None => Self::null(),
        }
    }

    /// Join an existing ownership group, incrementing its strong count.
    ///
    /// Safety: `raw` must belong to a group with at least one live strong
    /// handle.
    unsafe fn alias(raw: RawParts<T>) -> Self {
        raw.counts().strong.get();
        Self::from_counted(raw)
    }

    /// Wrap a strong unit the caller already acquired on `raw`.
    ///
    /// Safety: the caller must have incremented the strong count for this
    /// handle and hand that unit over.
    pub(crate) unsafe fn from_counted(raw: RawParts<T>) -> Self {
        Self {
            raw: Some(raw),
            _owns: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    /// Borrow the target, or `None` if the handle is empty.
    pub fn get(&self) -> Option<&T> {
        // SAFETY: a non-empty handle holds a strong unit, so the target is alive.
        self.raw.map(|raw| unsafe { &*raw.target.as_ptr() })
    }

    /// Mutably borrow the target when this is the only handle of its group,
    /// weak observers included.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let raw = self.raw?;
        // SAFETY: strong == 1 and no external weak unit means nobody else
        // can reach the target while `self` is mutably borrowed.
        unsafe {
            let counts = raw.counts();
            if counts.strong.count() == 1 && counts.weak.count() == 1 {
                Some(&mut *raw.target.as_ptr())
            } else {
                None
            }
        }
    }

    /// Number of strong handles in this group; zero for an empty handle.
    pub fn strong_count(&self) -> usize {
        // SAFETY: a non-empty handle keeps its counts block alive.
        self.raw
            .map(|raw| unsafe { raw.counts().strong.count() })
            .unwrap_or(0)
    }

    /// Number of `WeakPtr`s observing this group.
    pub fn weak_count(&self) -> usize {
        // SAFETY: as above; subtract the implicit unit held by strong handles.
        self.raw
            .map(|raw| unsafe { raw.counts().weak.count() } - 1)
            .unwrap_or(0)
    }

    /// True if both handles belong to the same ownership group, or both are empty.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (a.raw, b.raw) {
            (Some(x), Some(y)) => x.counts == y.counts,
            (None, None) => true,
            _ => false,
        }
    }

    /// Create a non-owning observer of this handle's target.
    pub fn downgrade(&self) -> WeakPtr<T> {
        WeakPtr::from_shared(self)
    }

    /// Release current ownership, leaving the handle empty.
    pub fn reset(&mut self) {
        let Some(raw) = self.raw.take() else {
            return;
        };
        // SAFETY: `raw` carried this handle's strong unit, which is returned
        // here exactly once. The handle is already empty when the target's
        // destructor runs.
        unsafe {
            if raw.counts().strong.put() {
                drop(Box::from_raw(raw.target.as_ptr()));
                raw.put_weak();
            }
        }
    }

    /// Release current ownership, then take ownership of `target` with a
    /// fresh counter of one.
    pub fn reset_to(&mut self, target: Box<T>) {
        self.reset();
        self.raw = Self::from_box(target).into_raw_parts();
    }

    /// Move the ownership out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Exchange targets and counters without touching either count.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    fn into_raw_parts(self) -> Option<RawParts<T>> {
        let this = ManuallyDrop::new(self);
        this.raw
    }
}

impl<T: Any> SharedPtr<T> {
    /// Erase the target type, keeping the same ownership group.
    pub fn into_any(self) -> SharedPtr<dyn Any> {
        match self.into_raw_parts() {
            Some(raw) => {
                let target: NonNull<dyn Any> = raw.target;
                // SAFETY: the strong unit held by `self` moves to the new handle.
                unsafe {
                    SharedPtr::from_counted(RawParts {
                        target,
                        counts: raw.counts,
                    })
                }
            }
            None => SharedPtr::null(),
        }
    }
}

impl SharedPtr<dyn Any> {
    /// Typed view of a type-erased target that shares this handle's counter.
    ///
    /// Returns an empty handle when the handle is empty or the target is not
    /// a `U`.
    pub fn downcast<U: Any>(&self) -> SharedPtr<U> {
        match self.raw {
            Some(raw) if self.get().is_some_and(|t| t.is::<U>()) => {
                let typed = RawParts {
                    target: raw.target.cast::<U>(),
                    counts: raw.counts,
                };
                // SAFETY: `self` is a live strong handle of the same group and
                // the concrete type was checked above.
                unsafe { SharedPtr::alias(typed) }
            }
            _ => SharedPtr::null(),
        }
    }
}

impl<T: ?Sized> Clone for SharedPtr<T> {
    fn clone(&self) -> Self {
        match self.raw {
            // SAFETY: `self` keeps the group alive while we join it.
            Some(raw) => unsafe { Self::alias(raw) },
            None => Self::null(),
        }
    }
}

impl<T: ?Sized> Drop for SharedPtr<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized> Deref for SharedPtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Some(target) => target,
            None => panic!("dereferenced a null SharedPtr"),
        }
    }
}

impl<T: ?Sized> Default for SharedPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Box<T>> for SharedPtr<T> {
    fn from(target: Box<T>) -> Self {
        Self::from_box(target)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(target) => f.debug_tuple("SharedPtr").field(&target).finish(),
            None => f.write_str("SharedPtr(null)"),
        }
    }
}
