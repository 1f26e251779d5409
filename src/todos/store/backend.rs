use crate::error::Result;

/// Raw string-keyed persistence, the equivalent of a browser's `localStorage`.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`LocalStore`](super::local_store::LocalStore) handles the "what": the
/// collection layout, id assignment and query semantics.
///
/// Methods take `&self`; implementations handle their own interior mutability.
pub trait StorageBackend {
    /// Returns the stored value for `key`, or `Ok(None)` if nothing was ever stored.
    /// Returns Err only on actual I/O errors.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    /// MUST be atomic so a failed write never leaves a partial value behind.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}
