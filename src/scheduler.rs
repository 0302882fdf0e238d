//! Cooperative tick scheduler.
//!
//! One loop, one thread.  Every tick the scheduler notifies a
//! [`SchedulerDelegate`]: first the network service (unconditionally), then
//! each interval-gated task whose interval has elapsed.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main loop: scheduler.tick(clock.now_ms(), &mut runtime) │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//!          ┌───────────────────┼────────────────────┐
//!          ▼                   ▼                    ▼
//!   service_network     SensorPipeline        DisplayRefresh
//!    (every tick)     (every sensor_ms)     (every display_ms)
//! ```
//!
//! Elapsed time is always `now.wrapping_sub(last_fire)`, so gating stays
//! correct when the 32-bit millisecond counter rolls over (~49.7 days).

use crate::app::ports::SchedulerDelegate;
use crate::config::ControllerConfig;
use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Task types
// ═══════════════════════════════════════════════════════════════

/// Interval-gated activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Sensor poll → mode evaluation → actuator apply.
    SensorPipeline,
    /// Redraw the character display.
    DisplayRefresh,
}

/// Milliseconds from `since` to `now` on a wrapping 32-bit counter.
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Fires at most once per `interval_ms`.
///
/// A timer that has never fired is due on its first check.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_fire_ms: Option<u32>,
}

impl IntervalTimer {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: None,
        }
    }

    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => elapsed_ms(now_ms, last) >= self.interval_ms,
        }
    }

    pub fn mark_fired(&mut self, now_ms: u32) {
        self.last_fire_ms = Some(now_ms);
    }

    pub fn last_fire_ms(&self) -> Option<u32> {
        self.last_fire_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// Last fire time of each timed activity (`None` until the first fire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleState {
    pub last_sensor_tick: Option<u32>,
    pub last_display_tick: Option<u32>,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
///
/// Decoupled from the work it triggers: it only calls the
/// [`SchedulerDelegate`], which makes it testable with a recording delegate
/// and a scripted clock.
pub struct Scheduler {
    sensor: IntervalTimer,
    display: IntervalTimer,
    ticks: u64,
}

impl Scheduler {
    pub fn new(config: &ControllerConfig) -> Self {
        Self::with_intervals(config.sensor_interval_ms, config.display_interval_ms)
    }

    pub fn with_intervals(sensor_interval_ms: u32, display_interval_ms: u32) -> Self {
        Self {
            sensor: IntervalTimer::new(sensor_interval_ms),
            display: IntervalTimer::new(display_interval_ms),
            ticks: 0,
        }
    }

    /// Run one tick at time `now_ms`.
    ///
    /// Order within a tick is fixed: network, sensor pipeline, display.
    /// Each delegate call runs to completion before the next starts.
    pub fn tick(&mut self, now_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        self.ticks = self.ticks.wrapping_add(1);

        delegate.service_network(now_ms);

        if self.sensor.is_due(now_ms) {
            debug!("Scheduler: sensor pipeline due at {}ms", now_ms);
            delegate.on_task_due(TaskId::SensorPipeline, now_ms);
            self.sensor.mark_fired(now_ms);
        }

        if self.display.is_due(now_ms) {
            delegate.on_task_due(TaskId::DisplayRefresh, now_ms);
            self.display.mark_fired(now_ms);
        }
    }

    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            last_sensor_tick: self.sensor.last_fire_ms(),
            last_display_tick: self.display.last_fire_ms(),
        }
    }

    /// Ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
