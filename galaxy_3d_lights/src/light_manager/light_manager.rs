//! Central light streaming manager.
//!
//! Owns the candidate registry, the scheduler and the two slot buffers,
//! and drives them once per host tick:
//!
//! ```text
//! schedule -> select (cull + rank) -> sync point slots -> sync spot slots
//! ```
//!
//! Nothing in `tick` can fail; every problem is logged, reflected in the
//! returned `TickReport`, and leaves the published counts consistent with
//! the uploaded data.

use std::sync::{Arc, Mutex, MutexGuard};

use glam::Vec3;

use crate::camera::ViewProvider;
use crate::config::LightConfig;
use crate::error::Result;
use crate::graphics_device::{Buffer, GraphicsDevice};
use crate::light::{LightArena, LightKey, LightKind, LightRegistry, LightSource};
use crate::scheduler::AdaptiveScheduler;
use crate::selection::{LightLod, LightRanker, PassStats};
use crate::slots::{GpuLight, GpuPointLight, GpuSpotLight, LightSlotBuffer};
use crate::{engine_debug, engine_err, engine_info, engine_warn};

const SOURCE: &str = "galaxy3d::lights::LightManager";

// ===== OUTPUTS =====

/// Shader-facing view of one kind's slots
#[derive(Clone)]
pub struct LightBinding {
    /// Name of the descriptor array binding
    pub buffer_name: &'static str,
    /// Name of the active count binding
    pub count_name: &'static str,
    pub buffer: Option<Arc<dyn Buffer>>,
    /// Valid slots, `[0, active_count)`
    pub active_count: usize,
}

/// What one `tick` did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Whether the pipeline ran (false: throttled by the scheduler)
    pub ran: bool,
    /// Interval computed this tick, seconds
    pub interval: f32,
    pub point: PassStats,
    pub spot: PassStats,
    /// Published point count after the tick
    pub point_count: usize,
    /// Published spot count after the tick
    pub spot_count: usize,
}

// ===== LIGHT MANAGER =====

pub struct LightManager {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: LightConfig,
    registry: LightRegistry,
    scheduler: AdaptiveScheduler,
    point_slots: LightSlotBuffer<GpuPointLight>,
    spot_slots: LightSlotBuffer<GpuSpotLight>,
    /// Handles occupying the published point slots, in slot order
    point_keys: Vec<LightKey>,
    spot_keys: Vec<LightKey>,
    /// Viewer position at the last pipeline run
    last_view_position: Option<Vec3>,
}

impl LightManager {
    /// Create the manager and allocate both slot buffers on `device`
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: LightConfig) -> Result<Self> {
        let mut point_slots = LightSlotBuffer::new(config.capacity(LightKind::Point));
        let mut spot_slots = LightSlotBuffer::new(config.capacity(LightKind::Spot));
        {
            let mut gpu = lock_device(&device)?;
            point_slots.allocate(&mut *gpu)?;
            spot_slots.allocate(&mut *gpu)?;
        }

        engine_info!(SOURCE, "Light manager created ({} point slots, {} spot slots, {} Hz)",
            point_slots.capacity(), spot_slots.capacity(), config.update_frequency_hz());

        Ok(Self {
            device,
            config,
            registry: LightRegistry::new(),
            scheduler: AdaptiveScheduler::new(),
            point_slots,
            spot_slots,
            point_keys: Vec::new(),
            spot_keys: Vec::new(),
            last_view_position: None,
        })
    }

    // ===== CONFIGURATION =====

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Apply a new configuration.
    ///
    /// A capacity change tears down that kind's GPU buffer and recreates it
    /// at the new size; its count reads 0 until the next pipeline run. Both
    /// kinds are refitted even when the first fails, and the first error is
    /// returned. A failed buffer stays released (syncs are skipped with a
    /// warning) until a later `set_config` allocates it.
    pub fn set_config(&mut self, config: LightConfig) -> Result<()> {
        let point_capacity = config.capacity(LightKind::Point);
        let spot_capacity = config.capacity(LightKind::Spot);
        self.config = config;
        self.scheduler.force();

        let mut gpu = lock_device(&self.device)?;
        let point = refit_slots(&mut self.point_slots, &mut self.point_keys, &mut *gpu, point_capacity);
        let spot = refit_slots(&mut self.spot_slots, &mut self.spot_keys, &mut *gpu, spot_capacity);
        point.and(spot)
    }

    // ===== REGISTRY =====

    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    /// Register a light under its own kind.
    ///
    /// Returns false (and logs) if the key is not in `arena` or is already
    /// registered. A successful add makes the next tick run.
    pub fn add_light(&mut self, arena: &LightArena, key: LightKey) -> bool {
        let Some(light) = arena.get(key) else {
            engine_warn!(SOURCE, "Cannot register light {:?}: not in arena", key);
            return false;
        };
        if !self.registry.add(light.kind, key) {
            engine_debug!(SOURCE, "Light {:?} already registered", key);
            return false;
        }
        self.scheduler.force();
        true
    }

    /// Unregister a light. A successful remove makes the next tick run.
    pub fn remove_light(&mut self, key: LightKey) -> bool {
        if !self.registry.remove(key) {
            return false;
        }
        self.scheduler.force();
        true
    }

    /// Unregister handles whose light is gone from `arena`
    pub fn prune(&mut self, arena: &LightArena) -> usize {
        let removed = self.registry.prune(arena);
        if removed > 0 {
            engine_debug!(SOURCE, "Pruned {} stale light handles", removed);
            self.scheduler.force();
        }
        removed
    }

    // ===== TICK =====

    /// Make the next tick run the pipeline regardless of the schedule
    pub fn force_update(&mut self) {
        self.scheduler.force();
    }

    /// Advance one host frame.
    ///
    /// `now` is the host clock in seconds, `delta_time` the time since the
    /// previous tick. The pipeline runs only when the adaptive interval
    /// has elapsed since its last run; otherwise the published state is
    /// left exactly as it was.
    pub fn tick(&mut self, now: f64, delta_time: f32, view: &dyn ViewProvider, arena: &LightArena) -> TickReport {
        let (active, capacity) = self.busiest_load();
        let interval = self.scheduler.compute_interval(view, delta_time, active, capacity, &self.config);

        let mut report = TickReport {
            ran: false,
            interval,
            point_count: self.point_slots.active_count(),
            spot_count: self.spot_slots.active_count(),
            ..TickReport::default()
        };

        if !self.scheduler.should_run(now) {
            return report;
        }
        self.scheduler.mark_run(now);
        self.last_view_position = Some(view.position());

        report.ran = true;
        report.point = run_pass(&mut self.point_slots, &mut self.point_keys, &self.registry, arena, view, &self.config);
        report.spot = run_pass(&mut self.spot_slots, &mut self.spot_keys, &self.registry, arena, view, &self.config);
        report.point_count = self.point_slots.active_count();
        report.spot_count = self.spot_slots.active_count();

        engine_debug!(SOURCE, "Light pass: {} point, {} spot (next in {:.3}s)",
            report.point_count, report.spot_count, interval);
        report
    }

    /// `(active, capacity)` of the kind whose buffer is fullest
    fn busiest_load(&self) -> (usize, usize) {
        let point = (self.point_slots.active_count(), self.point_slots.capacity());
        let spot = (self.spot_slots.active_count(), self.spot_slots.capacity());
        if AdaptiveScheduler::load_ratio(spot.0, spot.1) > AdaptiveScheduler::load_ratio(point.0, point.1) {
            spot
        } else {
            point
        }
    }

    // ===== QUERIES =====

    pub fn active_point_count(&self) -> usize {
        self.point_slots.active_count()
    }

    pub fn active_spot_count(&self) -> usize {
        self.spot_slots.active_count()
    }

    pub fn active_count(&self, kind: LightKind) -> usize {
        match kind {
            LightKind::Point => self.active_point_count(),
            LightKind::Spot => self.active_spot_count(),
        }
    }

    /// Interval computed by the last tick, seconds
    pub fn current_interval(&self) -> f32 {
        self.scheduler.interval()
    }

    pub fn point_slots(&self) -> &LightSlotBuffer<GpuPointLight> {
        &self.point_slots
    }

    pub fn spot_slots(&self) -> &LightSlotBuffer<GpuSpotLight> {
        &self.spot_slots
    }

    /// Handle occupying a published slot.
    ///
    /// Indices at or past the active count are logged and yield `None`.
    pub fn slot_light(&self, kind: LightKind, index: usize) -> Option<LightKey> {
        let keys = match kind {
            LightKind::Point => &self.point_keys,
            LightKind::Spot => &self.spot_keys,
        };
        let active = self.active_count(kind).min(keys.len());
        if index >= active {
            engine_warn!(SOURCE, "{} slot {} out of range (active count {})", kind.name(), index, active);
            return None;
        }
        keys.get(index).copied()
    }

    pub fn binding(&self, kind: LightKind) -> LightBinding {
        match kind {
            LightKind::Point => make_binding(&self.point_slots),
            LightKind::Spot => make_binding(&self.spot_slots),
        }
    }

    /// Point and spot bindings, in that order
    pub fn bindings(&self) -> [LightBinding; 2] {
        [self.binding(LightKind::Point), self.binding(LightKind::Spot)]
    }

    /// LOD tier of each published point slot, against the last run's viewer
    pub fn point_light_tiers(&self) -> Vec<LightLod> {
        slot_tiers(&self.point_slots, self.last_view_position)
    }

    /// LOD tier of each published spot slot, against the last run's viewer
    pub fn spot_light_tiers(&self) -> Vec<LightLod> {
        slot_tiers(&self.spot_slots, self.last_view_position)
    }

    // ===== SHUTDOWN =====

    /// Release both GPU buffers. Idempotent; also runs on drop.
    ///
    /// After shutdown, ticks keep running the selection but skip the upload
    /// and keep the counts at 0.
    pub fn shutdown(&mut self) {
        if !self.point_slots.is_allocated() && !self.spot_slots.is_allocated() {
            return;
        }

        if let Ok(gpu) = self.device.lock() {
            if let Err(e) = gpu.wait_idle() {
                engine_warn!(SOURCE, "wait_idle failed during shutdown: {}", e);
            }
        }

        self.point_slots.release();
        self.spot_slots.release();
        self.point_keys.clear();
        self.spot_keys.clear();
        engine_info!(SOURCE, "Light manager shut down");
    }
}

impl Drop for LightManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ===== HELPERS =====

fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| engine_err!(SOURCE, "Graphics device lock poisoned"))
}

/// Bring one kind's slots to `capacity` with a live GPU buffer.
///
/// Recreates on a capacity change, and allocates a buffer left released by
/// an earlier failure.
fn refit_slots<D: GpuLight>(
    slots: &mut LightSlotBuffer<D>,
    keys: &mut Vec<LightKey>,
    device: &mut dyn GraphicsDevice,
    capacity: usize,
) -> Result<()> {
    if capacity != slots.capacity() {
        engine_info!(SOURCE, "{} capacity {} -> {}", D::KIND.name(), slots.capacity(), capacity);
        keys.clear();
        return slots.resize(device, capacity);
    }
    if !slots.is_allocated() {
        keys.clear();
        return slots.allocate(device);
    }
    Ok(())
}

/// Select, then sync one kind's slots. Updates `keys` to the published order.
fn run_pass<D: GpuLight>(
    slots: &mut LightSlotBuffer<D>,
    keys: &mut Vec<LightKey>,
    registry: &LightRegistry,
    arena: &LightArena,
    view: &dyn ViewProvider,
    config: &LightConfig,
) -> PassStats {
    let selection = LightRanker::select(D::KIND, registry.handles(D::KIND), arena, view, config);

    // Every ranked key resolved during selection
    let lights: Vec<&LightSource> = selection.keys().filter_map(|k| arena.get(k)).collect();
    let uploading = slots.is_allocated();
    let count = slots.sync(&lights, config);

    // Unallocated slots keep their old descriptors, so keep their keys too
    if uploading {
        keys.clear();
        keys.extend(selection.keys().take(count));
    }
    selection.stats()
}

fn make_binding<D: GpuLight>(slots: &LightSlotBuffer<D>) -> LightBinding {
    LightBinding {
        buffer_name: D::BUFFER_NAME,
        count_name: D::COUNT_NAME,
        buffer: slots.buffer().cloned(),
        active_count: slots.active_count(),
    }
}

fn slot_tiers<D: GpuLight>(slots: &LightSlotBuffer<D>, viewer: Option<Vec3>) -> Vec<LightLod> {
    let Some(viewer) = viewer else {
        return Vec::new();
    };
    slots
        .active_slots()
        .iter()
        .map(|d| LightLod::classify(d.position().distance(viewer), d.range(), 1.0))
        .collect()
}

#[cfg(test)]
#[path = "light_manager_tests.rs"]
mod tests;
