//! Local key-value persistence for the session entry.

pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

/// Key names as constants.
pub mod keys {
    /// Serialized profile of the signed-in visitor.
    pub const SESSION_USER: &str = "warmPawsUser";
    /// Booking history of the signed-in visitor.
    pub const BOOKINGS: &str = "warmPawsBookings";
}

/// Narrow get/set/remove interface over a local string store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Persistence errors. Callers log these and carry on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage file: {0}")]
    Corrupt(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
