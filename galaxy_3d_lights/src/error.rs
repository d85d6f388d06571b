//! Error types for the Galaxy3D light streaming core
//!
//! Errors are produced by the fallible edges of the crate (GPU device and
//! buffer operations, configuration parsing). The per-tick pipeline never
//! propagates them to the host loop: it logs and degrades instead.

use std::fmt;

/// Result type for Galaxy3D light operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D light errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (Vulkan, mock device, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, light handle, configuration document, etc.)
    InvalidResource(String),

    /// Initialization failed (device, allocator, subsystems)
    InitializationFailed(String),

    /// A GPU resource was used before it was allocated
    Uninitialized(String),

    /// Backing descriptor storage does not match the declared capacity
    CapacityMismatch {
        /// Declared slot capacity
        capacity: usize,
        /// Actual length of the backing storage
        storage: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::Uninitialized(msg) => write!(f, "Uninitialized resource: {}", msg),
            Error::CapacityMismatch { capacity, storage } => write!(
                f,
                "Capacity mismatch: declared {} slots, backing storage holds {}",
                capacity, storage
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
