//! Access errors shared by the containers.

/// Failure of a positional or keyed container operation.
///
/// Fallible mutations (`remove_at`, `remove`) return this; lookups return
/// `Option`; the `Index` operators panic with the same message.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AccessError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("key not found")]
    KeyNotFound,
    #[error("element not found")]
    ElementNotFound,
}
