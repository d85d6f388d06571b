//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("vkCreateBuffer failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("vkCreateBuffer failed"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("light handle".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("light handle"));
}

#[test]
fn test_uninitialized_display() {
    let err = Error::Uninitialized("_PointLights".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Uninitialized resource"));
    assert!(display.contains("_PointLights"));
}

#[test]
fn test_capacity_mismatch_display() {
    let err = Error::CapacityMismatch { capacity: 8, storage: 4 };
    let display = format!("{}", err);
    assert!(display.contains("declared 8 slots"));
    assert!(display.contains("holds 4"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::InitializationFailed("init".to_string()));
    assert!(debug.contains("InitializationFailed"));

    let debug = format!("{:?}", Error::CapacityMismatch { capacity: 2, storage: 1 });
    assert!(debug.contains("CapacityMismatch"));
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::BackendError("test".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(Error::OutOfMemory, Error::BackendError("test".to_string()));
}

// ============================================================================
// RESULT ALIAS
// ============================================================================

#[test]
fn test_result_question_mark_propagation() {
    fn inner() -> Result<u32> {
        Err(Error::OutOfMemory)
    }
    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert_eq!(outer(), Err(Error::OutOfMemory));
}
