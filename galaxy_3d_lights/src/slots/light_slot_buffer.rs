/// LightSlotBuffer - fixed-capacity descriptor array mirrored to a GPU buffer.
///
/// Owns the CPU-side descriptor storage, the GPU buffer it is uploaded to,
/// and the published active count. Invariants:
///
/// - `0 <= active_count <= capacity`
/// - slots `[0, active_count)` hold the descriptors of the last successful
///   sync, in ranked order; slots past `active_count` are never exposed
/// - the count is published only after the upload it describes succeeded
///
/// The GPU buffer is released on drop, on `release()`, and before a
/// replacement is created by `resize()`.

use std::mem::size_of;
use std::sync::Arc;

use crate::config::LightConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{Buffer, BufferDesc, BufferUsage, GraphicsDevice};
use crate::light::LightSource;
use crate::{engine_debug, engine_error, engine_warn};
use super::gpu_light::GpuLight;

const SOURCE: &str = "galaxy3d::lights::LightSlotBuffer";

pub struct LightSlotBuffer<D: GpuLight> {
    capacity: usize,
    storage: Vec<D>,
    buffer: Option<Arc<dyn Buffer>>,
    active_count: usize,
}

impl<D: GpuLight> LightSlotBuffer<D> {
    /// Create an unallocated buffer with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            storage: vec![D::zeroed(); capacity],
            buffer: None,
            active_count: 0,
        }
    }

    // ===== ACCESSORS =====

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of valid slots published by the last sync
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_allocated(&self) -> bool {
        self.buffer.is_some()
    }

    /// GPU buffer backing the slots, if allocated
    pub fn buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.buffer.as_ref()
    }

    /// Size in bytes of the GPU buffer for this capacity
    pub fn byte_size(&self) -> u64 {
        (self.capacity * size_of::<D>()) as u64
    }

    /// The published descriptors, `[0, active_count)`
    pub fn active_slots(&self) -> &[D] {
        &self.storage[..self.active_count.min(self.storage.len())]
    }

    /// Descriptor of one published slot.
    ///
    /// Indices at or past `active_count` are logged and yield `None`.
    pub fn slot(&self, index: usize) -> Option<&D> {
        if index >= self.active_count {
            engine_warn!(SOURCE, "{} slot {} out of range (active count {})",
                D::KIND.name(), index, self.active_count);
            return None;
        }
        self.storage.get(index)
    }

    // ===== LIFETIME =====

    /// Create the GPU buffer sized to the current capacity.
    ///
    /// No-op when a buffer already exists.
    pub fn allocate(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.buffer.is_some() {
            return Ok(());
        }

        let buffer = device.create_buffer(BufferDesc {
            name: D::BUFFER_NAME.to_string(),
            size: self.byte_size(),
            usage: BufferUsage::Storage,
        })?;

        engine_debug!(SOURCE, "Allocated '{}' ({} slots, {} bytes)",
            D::BUFFER_NAME, self.capacity, self.byte_size());
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Tear down and recreate for a new capacity.
    ///
    /// The old GPU buffer is released before the new one is created, and
    /// the active count drops to 0 until the next sync.
    pub fn resize(&mut self, device: &mut dyn GraphicsDevice, capacity: usize) -> Result<()> {
        self.release();
        self.capacity = capacity;
        self.storage = vec![D::zeroed(); capacity];
        self.allocate(device)
    }

    /// Drop the GPU buffer and publish 0. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.buffer.take().is_some() {
            engine_debug!(SOURCE, "Released '{}'", D::BUFFER_NAME);
        }
        self.active_count = 0;
    }

    // ===== SYNC =====

    /// Write descriptors for `lights` (ranked, nearest first) and upload them.
    ///
    /// Never fails: an unallocated buffer keeps the last published count,
    /// any other error publishes 0. Returns the published count.
    pub fn sync(&mut self, lights: &[&LightSource], config: &LightConfig) -> usize {
        match self.try_sync(lights, config) {
            Ok(count) => count,
            Err(Error::Uninitialized(msg)) => {
                engine_warn!(SOURCE, "Sync skipped: {}", msg);
                self.active_count
            }
            Err(e) => {
                engine_error!(SOURCE, "Sync of '{}' failed, publishing 0: {}", D::BUFFER_NAME, e);
                self.active_count = 0;
                0
            }
        }
    }

    /// `sync` with the failure surfaced.
    ///
    /// On `Err(Uninitialized)` the published count is untouched; on any
    /// other error it is 0.
    pub fn try_sync(&mut self, lights: &[&LightSource], config: &LightConfig) -> Result<usize> {
        let Some(buffer) = self.buffer.clone() else {
            return Err(Error::Uninitialized(format!("'{}' has no GPU buffer", D::BUFFER_NAME)));
        };

        if self.storage.len() != self.capacity {
            self.active_count = 0;
            return Err(Error::CapacityMismatch {
                capacity: self.capacity,
                storage: self.storage.len(),
            });
        }

        if lights.len() > self.capacity {
            engine_warn!(SOURCE, "{} lights offered for {} '{}' slots, skipping the rest",
                lights.len(), self.capacity, D::BUFFER_NAME);
        }

        let count = lights.len().min(self.capacity);
        for (index, light) in lights.iter().take(count).enumerate() {
            self.storage[index] = D::from_light(light, config);
        }

        if count == 0 {
            // Nothing to read: leave GPU contents alone
            self.active_count = 0;
            return Ok(0);
        }

        let bytes: &[u8] = bytemuck::cast_slice(&self.storage[..count]);
        if let Err(e) = buffer.update(0, bytes) {
            self.active_count = 0;
            return Err(e);
        }

        self.active_count = count;
        Ok(count)
    }
}

impl<D: GpuLight> Drop for LightSlotBuffer<D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "light_slot_buffer_tests.rs"]
mod tests;
