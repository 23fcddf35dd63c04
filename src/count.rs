//! Reference counters behind the shared and weak handles.
//!
//! Counters are plain single-threaded integers. Crate-internal: the handles
//! only ever increment, decrement, or read through `Count`.

use core::cell::Cell;
use core::marker::PhantomData;

/// A source of counted references.
pub(crate) trait Count {
    /// Acquire one counted reference.
    fn get(&self);

    /// Acquire one counted reference only if at least one is still held.
    /// Returns false (and leaves the count at zero) otherwise.
    fn get_if_nonzero(&self) -> bool;

    /// Release one counted reference.
    /// Returns true if the count is now zero.
    fn put(&self) -> bool;

    /// Current number of counted references.
    fn count(&self) -> usize;
}

/// Single-threaded reference counter.
#[derive(Debug)]
pub(crate) struct UsizeCount {
    count: Cell<usize>,
    // !Send + !Sync: the counter is not atomic.
    _nosend: PhantomData<*mut ()>,
}

impl UsizeCount {
    pub(crate) const fn new(initial: usize) -> Self {
        Self {
            count: Cell::new(initial),
            _nosend: PhantomData,
        }
    }
}

impl Count for UsizeCount {
    #[inline]
    fn get(&self) {
        let n = self.count.get().wrapping_add(1);
        self.count.set(n);
        if n == 0 {
            // Follow Rc semantics: abort on overflow rather than continue unsafely.
            std::process::abort();
        }
    }

    #[inline]
    fn get_if_nonzero(&self) -> bool {
        if self.count.get() == 0 {
            return false;
        }
        self.get();
        true
    }

    #[inline]
    fn put(&self) -> bool {
        let c = self.count.get();
        assert!(c > 0, "UsizeCount underflow");
        let n = c - 1;
        self.count.set(n);
        n == 0
    }

    #[inline]
    fn count(&self) -> usize {
        self.count.get()
    }
}
