//! engine-utilities: single-threaded ownership handles and linear-scan
//! containers for a small game engine.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small set of leaf-level building blocks with precise
//!   ownership contracts, each usable on its own.
//! - Handles:
//!   - UniquePtr<T>: sole, move-only owner of a heap object.
//!   - SharedPtr<T>: reference-counted owner; clones join the same group.
//!   - WeakPtr<T>: non-owning observer of a SharedPtr group; `lock`
//!     promotes it while any strong handle remains.
//!   - StaticSlots / StaticPtr<T>: one owned instance per type, held in an
//!     explicit context rather than global state.
//! - Containers:
//!   - DynArray<T>: raw-buffer growable array with doubling growth.
//!   - DynMap<K, V>: unique-key map over a DynArray of Pair<K, V>.
//!   - DynSet<T>: unique-element set over a DynArray<T>.
//!
//! Constraints
//! - Single-threaded: handles are `!Send`/`!Sync` (no atomics).
//! - Containers own their storage outright; nothing aliases into it
//!   across container lifetimes.
//! - Map and set lookups are linear scans; insertion order is preserved.
//!
//! Counting model
//! - A SharedPtr group has a strong and a weak `UsizeCount` in a separate
//!   counts block. Strong handles jointly hold one weak unit, so the block
//!   outlives the target until the last weak observer is gone. A WeakPtr
//!   never reads freed counters.
//! - Overflowing a count aborts the process, matching `Rc`.
//! - Cycles of SharedPtrs leak; break them with WeakPtr.
//!
//! Error policy
//! - Fallible mutations (`DynArray::remove_at`, `DynMap::remove`,
//!   `DynSet::remove`) return `Result<_, AccessError>` and log the miss at
//!   debug level through the `log` facade.
//! - Lookups (`get`, `get_mut`, `contains*`) return `Option`/`bool`.
//! - The `Index` operators panic with the `AccessError` message, the same
//!   way slice indexing does. Nothing in this crate exits the process on a
//!   bad index or key.
//!
//! Notes and non-goals
//! - No hashing: map/set cost is O(n) per lookup.
//! - No allocation-failure recovery; `handle_alloc_error` is fatal.

mod count;
mod dyn_array;
mod dyn_map;
mod dyn_set;
mod error;
mod pair;
mod shared_ptr;
mod static_ptr;
mod unique_ptr;
mod weak_ptr;

#[cfg(test)]
mod container_proptest;

// Public surface
pub use dyn_array::DynArray;
pub use dyn_map::DynMap;
pub use dyn_set::DynSet;
pub use error::AccessError;
pub use pair::Pair;
pub use shared_ptr::{make_shared, SharedPtr};
pub use static_ptr::{StaticPtr, StaticSlots};
pub use unique_ptr::{make_unique, UniquePtr};
pub use weak_ptr::WeakPtr;
