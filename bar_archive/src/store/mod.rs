//! Durable object store boundary.
//!
//! The archive addresses artifacts by opaque string locations (one
//! `<SYMBOL>.csv` per symbol) and only needs two operations: read the whole
//! object or replace it wholesale. Replacement is the unit of atomicity: a
//! reader must see either the previous artifact or the new one in full,
//! never a mix. Each implementation supplies that with its native replace
//! semantics; the engine does no locking of its own.

mod local;
mod memory;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

pub use local::LocalStore;
pub use memory::MemoryStore;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    /// An error occurred while reading an object.
    #[snafu(display("Failed to read {location}: {message}"))]
    ReadError {
        location: String,
        message: String,
        backtrace: Backtrace,
    },

    /// An error occurred while writing or promoting an object.
    #[snafu(display("Failed to write {location}: {message}"))]
    WriteError {
        location: String,
        message: String,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full object at `location`, or `None` if nothing has been
    /// written there yet.
    async fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the object at `location` with `bytes` in one step.
    async fn write(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

// Shared handles delegate, so callers can keep a reference to the store they
// hand to the orchestrator.
#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<S> {
    async fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).read(location).await
    }

    async fn write(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(location, bytes).await
    }
}
