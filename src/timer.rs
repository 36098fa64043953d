use std::time::Duration;

use log::{debug, info};

use crate::scheduler::TickHandle;

/// Delay between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Services the countdown needs from whatever hosts it.
pub trait Host {
    /// Show a new display string for the remaining time.
    fn refresh(&mut self, display: &str);

    /// Arrange for [`Countdown::fire`] to be called once `delay` has passed.
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;

    /// Drop a tick scheduled with [`Host::schedule_after`].
    fn cancel(&mut self, handle: TickHandle);
}

/// Whether the countdown is ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not ticking, no tick pending.
    Idle,
    /// Ticking once per [`TICK_INTERVAL`].
    Running,
}

/// Countdown timer that ticks down once per second while running.
#[derive(Debug)]
pub struct Countdown {
    /// Seconds left on the countdown.
    remaining_seconds: u64,
    phase: Phase,
    /// The scheduled next tick.
    ///
    /// At most one is ever pending; it is only set while running.
    pending_tick: Option<TickHandle>,
}

impl Countdown {
    /// Create an idle countdown with no time on it.
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            phase: Phase::Idle,
            pending_tick: None,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[cfg(test)]
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    /// The remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_time(self.remaining_seconds)
    }

    /// Add whole minutes to the countdown.
    ///
    /// Works while idle or running and never changes the phase.
    ///
    /// # Arguments
    ///
    /// * `minutes` - The minutes to add.
    /// * `host` - Receives the display refresh.
    pub fn add_duration<H: Host>(&mut self, minutes: u32, host: &mut H) {
        self.remaining_seconds = self
            .remaining_seconds
            .saturating_add(u64::from(minutes) * 60);
        info!("Added {} min (remaining: {}s)", minutes, self.remaining_seconds);

        host.refresh(&self.display());
    }

    /// Start counting down.
    ///
    /// Rejected quietly if there is no time left or the countdown is already
    /// running. Otherwise the first tick runs right away.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.remaining_seconds == 0 {
            debug!("Start rejected, no time on the countdown");
            return;
        }
        if self.is_running() {
            debug!("Start rejected, already running");
            return;
        }

        info!("Starting countdown at {}", self.display());
        self.phase = Phase::Running;
        self.tick(host);
    }

    /// Stop counting down and cancel the pending tick, if any.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if self.is_running() {
            info!("Stopped at {}", self.display());
        }

        self.phase = Phase::Idle;
        if let Some(handle) = self.pending_tick.take() {
            host.cancel(handle);
        }
    }

    /// Stop and reset the countdown to zero.
    pub fn clear<H: Host>(&mut self, host: &mut H) {
        self.stop(host);
        self.remaining_seconds = 0;
        info!("Cleared");

        host.refresh(&self.display());
    }

    /// Run the tick scheduled under `handle`.
    ///
    /// Ticks from any handle other than the pending one are stale and
    /// dropped.
    pub fn fire<H: Host>(&mut self, handle: TickHandle, host: &mut H) {
        if self.pending_tick != Some(handle) {
            debug!("Dropping stale tick {:?}", handle);
            return;
        }

        self.pending_tick = None;
        self.tick(host);
    }

    /// Count down a single second.
    ///
    /// Quietly returns if the countdown is not running. Reschedules itself
    /// while time is left, and goes idle on the tick that reaches zero.
    fn tick<H: Host>(&mut self, host: &mut H) {
        if !self.is_running() {
            return;
        }

        if let Some(handle) = self.pending_tick.take() {
            host.cancel(handle);
        }

        if self.remaining_seconds == 0 {
            self.finish(host);
            return;
        }

        self.remaining_seconds -= 1;
        debug!("tick: {}", self.display());

        if self.remaining_seconds == 0 {
            self.finish(host);
            return;
        }

        host.refresh(&self.display());
        self.pending_tick = Some(host.schedule_after(TICK_INTERVAL));
    }

    fn finish<H: Host>(&mut self, host: &mut H) {
        self.phase = Phase::Idle;
        self.remaining_seconds = 0;
        info!("Countdown finished");

        host.refresh(&self.display());
    }
}

/// Format seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so they can grow past 99.
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
