//! DynArray: growable, index-addressed, contiguous array.
//!
//! Storage is a raw heap buffer of `cap` slots of which the first `len`
//! are initialized. Growth always doubles (`0 -> 1 -> 2 -> 4 -> ...`) by
//! allocating a new buffer, moving the live prefix over, and freeing the old
//! one. Capacity never shrinks; removals only shift elements left.
//!
//! Zero-sized element types never allocate but still report capacity by the
//! same doubling law.

use crate::error::AccessError;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc::{self, Layout};

pub struct DynArray<T> {
    buf: NonNull<T>,
    cap: usize,
    len: usize,
    _owns: PhantomData<T>,
}

// SAFETY: DynArray owns its elements outright, like Vec<T>.
unsafe impl<T: Send> Send for DynArray<T> {}
unsafe impl<T: Sync> Sync for DynArray<T> {}

#[cold]
fn capacity_overflow() -> ! {
    panic!("DynArray capacity overflow");
}

/// Capacity after one growth step from `cap`.
#[inline]
fn next_capacity(cap: usize) -> usize {
    if cap == 0 {
        return 1;
    }
    match cap.checked_mul(2) {
        Some(n) => n,
        None => capacity_overflow(),
    }
}

impl<T> DynArray<T> {
    /// An empty array with zero capacity; does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: NonNull::dangling(),
            cap: 0,
            len: 0,
            _owns: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut a = Self::new();
        if capacity > 0 {
            a.grow_to(capacity);
        }
        a
    }

    fn layout(cap: usize) -> Layout {
        match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    fn grow_to(&mut self, new_cap: usize) {
        debug_assert!(new_cap > self.cap);
        if mem::size_of::<T>() == 0 {
            self.cap = new_cap;
            return;
        }
        let new_layout = Self::layout(new_cap);
        // SAFETY: new_layout has non-zero size (T is not a ZST, new_cap > 0).
        let raw = unsafe { alloc::alloc(new_layout) } as *mut T;
        let Some(new_buf) = NonNull::new(raw) else {
            alloc::handle_alloc_error(new_layout);
        };
        if self.cap > 0 {
            // SAFETY: the old buffer holds `len` initialized elements and the
            // new one has room for them; the buffers do not overlap. The
            // elements are moved bitwise, so the old slots are not dropped.
            unsafe {
                ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), self.len);
                alloc::dealloc(self.buf.as_ptr() as *mut u8, Self::layout(self.cap));
            }
        }
        self.buf = new_buf;
        self.cap = new_cap;
    }

    /// Number of initialized elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current buffer holds without growing.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Append `value`, doubling the capacity first if the buffer is full.
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.grow_to(next_capacity(self.cap));
        }
        // SAFETY: len < cap after growth; slot `len` is allocated and unused.
        unsafe { self.buf.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialized and is now logically unused.
        Some(unsafe { self.buf.as_ptr().add(self.len).read() })
    }

    /// Remove the element at `index`, shifting everything after it left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, AccessError> {
        if index >= self.len {
            log::debug!("DynArray::remove_at: index {} out of range for length {}", index, self.len);
            return Err(AccessError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        // SAFETY: index < len, so the slot is initialized; the tail
        // [index+1, len) is moved down over it with an overlapping copy.
        let value = unsafe {
            let slot = self.buf.as_ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        let live: *mut [T] = self.as_mut_slice();
        // Mark empty first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // SAFETY: `live` covered exactly the initialized prefix.
        unsafe { ptr::drop_in_place(live) };
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialized; buf is dangling-but-aligned when cap == 0.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Index of the first element matching `pred`, scanning from the front.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.clear();
        if self.cap > 0 && mem::size_of::<T>() > 0 {
            // SAFETY: buf was allocated with exactly this layout.
            unsafe { alloc::dealloc(self.buf.as_ptr() as *mut u8, Self::layout(self.cap)) };
        }
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(v) => v,
            None => panic!("{}", AccessError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("{}", AccessError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.cap);
        for v in self.iter() {
            out.push(v.clone());
        }
        out
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut a = Self::new();
        a.extend(iter);
        a
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
