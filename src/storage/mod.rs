//! Pluggable key-value storage for device ids and session tokens
//!
//! The client persists three values between calls and across process
//! restarts: the per-install device id, the current access token and its
//! expiry timestamp. Any backend implementing [`StorageHandler`] can hold
//! them; [`FileStorageHandler`] is the default and [`MemoryStorageHandler`]
//! is useful for tests and throwaway sessions.

pub mod file;
pub mod memory;

#[cfg(test)]
mod tests;

pub use file::FileStorageHandler;
pub use memory::MemoryStorageHandler;

use crate::error::Result;
use uuid::Uuid;

/// Storage key for the persisted device id.
pub const DEVICE_ID_KEY: &str = "device_id";
/// Storage key for the cached bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the token expiry (unix epoch seconds, stored as string).
pub const EXPIRES_KEY: &str = "expires";

/// Abstract string-to-string store used by the client for session state.
///
/// Implementations take `&self` and handle their own interior mutability so
/// the client can call through a shared reference; the crate assumes
/// single-threaded use and provides no cross-writer coordination.
pub trait StorageHandler: Send {
    /// Mint a fresh device id for a new install.
    fn new_device_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether a value is stored under `key`.
    fn has_value(&self, key: &str) -> Result<bool>;

    /// Fetch the value stored under `key`; missing keys are an error.
    fn get_value(&self, key: &str) -> Result<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_value(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn delete_value(&self, key: &str) -> Result<()>;
}
