/// Unit tests for MockGraphicsDevice and MockBuffer.

use crate::graphics_device::mock_graphics_device::*;
use crate::graphics_device::{BufferDesc, BufferUsage, GraphicsDevice};
use crate::error::Error;

fn storage_desc(name: &str, size: u64) -> BufferDesc {
    BufferDesc { name: name.to_string(), size, usage: BufferUsage::Storage }
}

// ============================================================================
// MockGraphicsDevice Tests
// ============================================================================

#[test]
fn test_mock_device_create_buffer() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage_desc("_PointLights", 64)).unwrap();

    assert_eq!(buffer.size(), 64);
    assert_eq!(device.created_buffers(), vec!["_PointLights".to_string()]);
    assert_eq!(device.stats().live_buffers, 1);
    assert_eq!(device.stats().gpu_memory_used, 64);
}

#[test]
fn test_mock_device_fail_creates() {
    let mut device = MockGraphicsDevice::new();
    device.set_fail_creates(true);

    let result = device.create_buffer(storage_desc("_SpotLights", 64));
    assert!(matches!(result, Err(Error::OutOfMemory)));
    assert!(device.created_buffers().is_empty());
}

#[test]
fn test_mock_device_wait_idle() {
    let device = MockGraphicsDevice::new();
    assert!(device.wait_idle().is_ok());
}

// ============================================================================
// MockBuffer Tests
// ============================================================================

#[test]
fn test_mock_buffer_update_records_contents() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage_desc("_PointLights", 8)).unwrap();

    buffer.update(2, &[1, 2, 3]).unwrap();

    assert_eq!(device.contents("_PointLights").unwrap(), vec![0, 0, 1, 2, 3, 0, 0, 0]);
    let uploads = device.uploads_to("_PointLights");
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].offset, 2);
    assert_eq!(uploads[0].data, vec![1, 2, 3]);
}

#[test]
fn test_mock_buffer_update_out_of_bounds() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage_desc("_PointLights", 4)).unwrap();

    assert!(buffer.update(2, &[1, 2, 3]).is_err());
    assert!(device.uploads().is_empty());
}

#[test]
fn test_mock_buffer_injected_update_failure() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage_desc("_PointLights", 4)).unwrap();
    device.set_fail_updates(true);

    assert!(buffer.update(0, &[1]).is_err());

    device.set_fail_updates(false);
    assert!(buffer.update(0, &[1]).is_ok());
}

#[test]
fn test_mock_buffer_drop_releases_memory() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage_desc("_SpotLights", 128)).unwrap();
    assert_eq!(device.stats().gpu_memory_used, 128);

    drop(buffer);

    assert_eq!(device.dropped_buffers(), vec!["_SpotLights".to_string()]);
    assert_eq!(device.stats().live_buffers, 0);
    assert_eq!(device.stats().gpu_memory_used, 0);
}
