//! UniquePtr: exclusive, move-only ownership of a heap object.

use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};

/// Sole owner of a heap object, or empty.
///
/// There is no `Clone`: ownership only moves, either by value or through
/// [`UniquePtr::take`], which leaves the source empty.
pub struct UniquePtr<T: ?Sized> {
    target: Option<Box<T>>,
}

/// Allocate `value` and wrap it in a fresh `UniquePtr`.
pub fn make_unique<T>(value: T) -> UniquePtr<T> {
    UniquePtr::new(value)
}

impl<T> UniquePtr<T> {
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }
}

impl<T: ?Sized> UniquePtr<T> {
    pub const fn null() -> Self {
        Self { target: None }
    }

    pub fn from_box(target: Box<T>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Take sole ownership of a raw pointer. Null yields an empty handle.
    ///
    /// # Safety
    /// `target` must be null or come from `Box::into_raw`, and nothing else
    /// may own it afterwards.
    pub unsafe fn from_raw(target: *mut T) -> Self {
        if target.is_null() {
            Self::null()
        } else {
            Self::from_box(Box::from_raw(target))
        }
    }

    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.target.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.target.as_deref_mut()
    }

    /// Give up ownership without destroying the target. The handle is
    /// empty afterwards and the caller owns the returned box.
    pub fn release(&mut self) -> Option<Box<T>> {
        self.target.take()
    }

    /// Like [`release`](Self::release), but hands back a raw pointer (null if
    /// the handle was empty). Rebuild it with `Box::from_raw` or
    /// [`UniquePtr::from_raw`] to destroy it.
    pub fn into_raw(mut self) -> *mut T
    where
        T: Sized,
    {
        match self.release() {
            Some(target) => Box::into_raw(target),
            None => core::ptr::null_mut(),
        }
    }

    /// Destroy the owned object, if any, leaving the handle empty.
    pub fn reset(&mut self) {
        self.target = None;
    }

    /// Destroy the owned object, if any, then own `target`.
    pub fn reset_to(&mut self, target: Box<T>) {
        self.reset();
        self.target = Some(target);
    }

    /// Move ownership out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Move ownership from `other` into `self`, destroying whatever `self`
    /// owned before. `other` is empty afterwards.
    pub fn assign_from(&mut self, other: &mut Self) {
        self.reset();
        self.target = other.target.take();
    }
}

impl<T: ?Sized> Deref for UniquePtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Some(target) => target,
            None => panic!("dereferenced a null UniquePtr"),
        }
    }
}

impl<T: ?Sized> DerefMut for UniquePtr<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(target) => target,
            None => panic!("dereferenced a null UniquePtr"),
        }
    }
}

impl<T: ?Sized> Default for UniquePtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Box<T>> for UniquePtr<T> {
    fn from(target: Box<T>) -> Self {
        Self::from_box(target)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for UniquePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(target) => f.debug_tuple("UniquePtr").field(&target).finish(),
            None => f.write_str("UniquePtr(null)"),
        }
    }
}
