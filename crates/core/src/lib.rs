//! Booking core types and utilities

pub mod error;
pub mod storage;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use error::{CoreError, CoreResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, Storage};
