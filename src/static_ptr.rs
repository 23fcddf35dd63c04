//! Per-type singleton slots held in an explicit context.
//!
//! `StaticSlots` owns at most one instance of each `'static` type. It is
//! created and torn down by the application; nothing here is global. A
//! `StaticPtr` is a scoped owner of one type's slot: it installs on
//! construction and destroys the current instance when dropped.

use core::any::{type_name, Any, TypeId};
use core::fmt;
use core::marker::PhantomData;
use hashbrown::HashMap;

/// Type-indexed owning slots, one per instantiated type.
#[derive(Default)]
pub struct StaticSlots {
    slots: HashMap<TypeId, Box<dyn Any>>,
}

impl StaticSlots {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Install `value` as the instance for `T`, destroying any prior one first.
    pub fn install<T: 'static>(&mut self, value: T) {
        if self.reset::<T>() {
            log::debug!("replaced static instance of {}", type_name::<T>());
        }
        self.slots.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Same as [`install`](Self::install); the counterpart of [`reset`](Self::reset).
    pub fn reset_to<T: 'static>(&mut self, value: T) {
        self.install(value);
    }

    /// Destroy the instance for `T`, if present. Returns whether one was destroyed.
    pub fn reset<T: 'static>(&mut self) -> bool {
        match self.slots.remove(&TypeId::of::<T>()) {
            Some(prev) => {
                // Slot is already vacant while the destructor runs.
                drop(prev);
                true
            }
            None => false,
        }
    }

    /// Remove the instance for `T` without destroying it.
    pub fn take<T: 'static>(&mut self) -> Option<T> {
        let prev = self.slots.remove(&TypeId::of::<T>())?;
        prev.downcast::<T>().ok().map(|b| *b)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.downcast_mut::<T>())
    }

    pub fn is_null<T: 'static>(&self) -> bool {
        !self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Destroy every installed instance.
    pub fn clear(&mut self) {
        if !self.slots.is_empty() {
            log::trace!("tearing down {} static instance(s)", self.slots.len());
        }
        // Drain so each destructor runs with its slot already vacant.
        for (_, instance) in self.slots.drain() {
            drop(instance);
        }
    }
}

impl Drop for StaticSlots {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for StaticSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSlots")
            .field("len", &self.slots.len())
            .finish()
    }
}

/// Scoped owner of the `T` slot in a [`StaticSlots`].
///
/// Dropping the guard destroys whatever instance the slot holds at that
/// point, including instances installed through other paths.
pub struct StaticPtr<'a, T: 'static> {
    slots: &'a mut StaticSlots,
    _ty: PhantomData<fn() -> T>,
}

impl<'a, T: 'static> StaticPtr<'a, T> {
    /// Install `value`, destroying any prior instance of `T` first.
    pub fn new(slots: &'a mut StaticSlots, value: T) -> Self {
        slots.install(value);
        Self::attach(slots)
    }

    /// Take charge of the `T` slot as it is, occupied or not.
    pub fn attach(slots: &'a mut StaticSlots) -> Self {
        Self {
            slots,
            _ty: PhantomData,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.slots.get::<T>()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slots.get_mut::<T>()
    }

    pub fn is_null(&self) -> bool {
        self.slots.is_null::<T>()
    }

    pub fn reset(&mut self) {
        self.slots.reset::<T>();
    }

    pub fn reset_to(&mut self, value: T) {
        self.slots.install(value);
    }
}

impl<'a, T: 'static> Drop for StaticPtr<'a, T> {
    fn drop(&mut self) {
        self.slots.reset::<T>();
    }
}
