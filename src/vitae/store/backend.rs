use crate::error::Result;
use serde_json::Value;

/// Abstract interface for raw storage I/O.
///
/// Handles the "how" of storage (filesystem vs memory), while
/// [`CvStore`](super::CvStore) handles the "what" (defaults, decoding,
/// write-through).
pub trait StorageBackend {
    /// Returns the value previously saved under `key`.
    ///
    /// `None` when nothing was stored or the stored bytes are not valid JSON.
    /// Never fails: unreadable state is treated as absent.
    fn load(&self, key: &str) -> Option<Value>;

    /// Durably overwrites the value under `key`.
    /// MUST be atomic: a failed save leaves the previous value intact.
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}
