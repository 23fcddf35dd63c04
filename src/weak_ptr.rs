//! WeakPtr: non-owning observer of a `SharedPtr` target.

use crate::count::Count;
use crate::shared_ptr::{RawParts, SharedPtr};
use core::fmt;

/// Observes a `SharedPtr` group without keeping the target alive.
///
/// A weak handle never touches the strong count except through
/// [`WeakPtr::lock`]. It does hold a unit of the group's weak count, which
/// keeps the counters (not the target) allocated, so `lock` stays sound after
/// the last strong handle is gone.
pub struct WeakPtr<T: ?Sized> {
    raw: Option<RawParts<T>>,
}

impl<T: ?Sized> WeakPtr<T> {
    /// A weak handle that observes nothing; `lock` always yields null.
    pub const fn new() -> Self {
        Self { raw: None }
    }

    /// Observe the group `shared` belongs to. Observing an empty handle
    /// yields an empty weak handle.
    pub fn from_shared(shared: &SharedPtr<T>) -> Self {
        if let Some(raw) = shared.raw {
            // SAFETY: `shared` is a live strong handle, so counts are allocated.
            unsafe { raw.counts().weak.get() };
        }
        Self { raw: shared.raw }
    }

    /// Promote to a `SharedPtr`, or return an empty one if every strong
    /// handle is already gone.
    pub fn lock(&self) -> SharedPtr<T> {
        let Some(raw) = self.raw else {
            return SharedPtr::null();
        };
        // SAFETY: our weak unit keeps the counts allocated. A non-zero strong
        // count means the target has not been destroyed yet.
        unsafe {
            if raw.counts().strong.get_if_nonzero() {
                SharedPtr::from_counted(raw)
            } else {
                SharedPtr::null()
            }
        }
    }

    /// Number of strong handles still owning the target.
    pub fn strong_count(&self) -> usize {
        // SAFETY: our weak unit keeps the counts allocated.
        self.raw
            .map(|raw| unsafe { raw.counts().strong.count() })
            .unwrap_or(0)
    }

    /// True once the target has been destroyed (or was never observed).
    pub fn expired(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: ?Sized> Clone for WeakPtr<T> {
    fn clone(&self) -> Self {
        if let Some(raw) = self.raw {
            // SAFETY: `self` holds a weak unit, so counts are allocated.
            unsafe { raw.counts().weak.get() };
        }
        Self { raw: self.raw }
    }
}

impl<T: ?Sized> Drop for WeakPtr<T> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: this handle owned exactly one weak unit.
            unsafe { raw.put_weak() };
        }
    }
}

impl<T: ?Sized> Default for WeakPtr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> From<&SharedPtr<T>> for WeakPtr<T> {
    fn from(shared: &SharedPtr<T>) -> Self {
        Self::from_shared(shared)
    }
}

impl<T: ?Sized> fmt::Debug for WeakPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(WeakPtr)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_ptr::make_shared;

    /// Invariant: constructing a weak handle leaves the strong count unchanged.
    #[test]
    fn construction_does_not_count() {
        let sp = make_shared(10);
        let w = WeakPtr::from(&sp);
        assert_eq!(sp.strong_count(), 1);
        assert_eq!(sp.weak_count(), 1);
        assert_eq!(w.strong_count(), 1);
        assert!(!w.expired());
    }

    /// Invariant: `lock` on a live group yields a handle to the same target and
    /// increments the strong count.
    #[test]
    fn lock_promotes_live_target() {
        let sp = make_shared(50);
        let w = sp.downgrade();
        {
            let sp2 = w.lock();
            assert!(!sp2.is_null());
            assert_eq!(*sp2, 50);
            assert_eq!(sp.strong_count(), 2);
            assert!(SharedPtr::ptr_eq(&sp, &sp2));
        }
        assert_eq!(sp.strong_count(), 1);
    }

    /// Invariant: once the last strong handle is reset, `lock` yields null.
    #[test]
    fn lock_after_reset_is_null() {
        let mut sp = make_shared(50);
        let w = sp.downgrade();
        sp.reset();
        assert!(w.expired());
        assert!(w.lock().is_null());
        assert_eq!(w.strong_count(), 0);
    }

    /// Invariant: moving the observed handle over another does not expire the
    /// observer; only the group's last owner going away does.
    #[test]
    fn move_keeps_group_alive() {
        let mut sp1 = make_shared(10);
        let w = sp1.downgrade();
        let mut sp3 = make_shared(20);
        let w20 = sp3.downgrade();
        sp3 = sp1.take();
        assert!(sp1.is_null());
        assert!(w20.expired());
        assert_eq!(*w.lock(), 10);
        drop(sp3);
        assert!(w.lock().is_null());
    }

    /// Invariant: observing an empty handle, or default construction, never locks.
    #[test]
    fn empty_observers() {
        let empty: SharedPtr<i32> = SharedPtr::null();
        let w = WeakPtr::from_shared(&empty);
        assert!(w.lock().is_null());
        assert!(w.expired());
        let d: WeakPtr<i32> = WeakPtr::default();
        assert!(d.lock().is_null());
        assert!(d.clone().expired());
    }

    /// Invariant: cloned weak handles outliving the target free the counters
    /// only when the last of them drops.
    #[test]
    fn weak_clones_outlive_target() {
        let sp = make_shared(String::from("x"));
        let w1 = sp.downgrade();
        let w2 = w1.clone();
        assert_eq!(sp.weak_count(), 2);
        drop(sp);
        drop(w1);
        assert!(w2.lock().is_null());
        drop(w2);
    }
}
