/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every buffer creation, upload and destruction in a shared
/// `MockDeviceLog` so tests can assert exactly what reached the "GPU".

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{Buffer, BufferDesc, GraphicsDevice, GraphicsDeviceStats};

// ============================================================================
// Shared log
// ============================================================================

/// One recorded `Buffer::update` call
#[derive(Debug, Clone, PartialEq)]
pub struct MockUpload {
    pub buffer: String,
    pub offset: u64,
    pub data: Vec<u8>,
}

/// Everything the mock device and its buffers observed
#[derive(Debug, Default)]
pub struct MockDeviceLog {
    pub created: Vec<BufferDesc>,
    pub uploads: Vec<MockUpload>,
    pub dropped: Vec<String>,
    /// Current contents of each live buffer, by name
    pub contents: FxHashMap<String, Vec<u8>>,
    pub live_buffers: u32,
    pub gpu_memory_used: u64,
    pub fail_creates: bool,
    pub fail_updates: bool,
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub name: String,
    pub size: u64,
    log: Arc<Mutex<MockDeviceLog>>,
}

impl MockBuffer {
    pub fn new(name: String, size: u64, log: Arc<Mutex<MockDeviceLog>>) -> Self {
        {
            let mut log = log.lock().unwrap();
            log.contents.insert(name.clone(), vec![0u8; size as usize]);
            log.live_buffers += 1;
            log.gpu_memory_used += size;
        }
        Self { name, size, log }
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        if log.fail_updates {
            engine_bail!("galaxy3d::mock", "Injected update failure on '{}'", self.name);
        }
        let end = offset + data.len() as u64;
        if end > self.size {
            engine_bail!("galaxy3d::mock",
                "Write of {} bytes at offset {} exceeds buffer '{}' size {}",
                data.len(), offset, self.name, self.size);
        }
        if let Some(contents) = log.contents.get_mut(&self.name) {
            contents[offset as usize..end as usize].copy_from_slice(data);
        }
        log.uploads.push(MockUpload {
            buffer: self.name.clone(),
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.dropped.push(self.name.clone());
            log.live_buffers -= 1;
            log.gpu_memory_used -= self.size;
        }
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock GraphicsDevice that tracks created buffers without GPU
#[derive(Debug, Clone)]
pub struct MockGraphicsDevice {
    pub log: Arc<Mutex<MockDeviceLog>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self { log: Arc::new(Mutex::new(MockDeviceLog::default())) }
    }

    /// Make every subsequent `create_buffer` fail with OutOfMemory
    pub fn set_fail_creates(&self, fail: bool) {
        self.log.lock().unwrap().fail_creates = fail;
    }

    /// Make every subsequent `Buffer::update` fail
    pub fn set_fail_updates(&self, fail: bool) {
        self.log.lock().unwrap().fail_updates = fail;
    }

    /// Names of created buffers, in creation order
    pub fn created_buffers(&self) -> Vec<String> {
        self.log.lock().unwrap().created.iter().map(|d| d.name.clone()).collect()
    }

    /// Names of dropped buffers, in drop order
    pub fn dropped_buffers(&self) -> Vec<String> {
        self.log.lock().unwrap().dropped.clone()
    }

    /// All recorded uploads
    pub fn uploads(&self) -> Vec<MockUpload> {
        self.log.lock().unwrap().uploads.clone()
    }

    /// Uploads recorded for one buffer
    pub fn uploads_to(&self, name: &str) -> Vec<MockUpload> {
        self.uploads().into_iter().filter(|u| u.buffer == name).collect()
    }

    /// Current contents of a live buffer
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.log.lock().unwrap().contents.get(name).cloned()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.log.lock().unwrap().fail_creates {
            return Err(Error::OutOfMemory);
        }
        self.log.lock().unwrap().created.push(desc.clone());
        Ok(Arc::new(MockBuffer::new(desc.name, desc.size, Arc::clone(&self.log))))
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> GraphicsDeviceStats {
        let log = self.log.lock().unwrap();
        GraphicsDeviceStats {
            live_buffers: log.live_buffers,
            gpu_memory_used: log.gpu_memory_used,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
