use std::time::Duration;
use crate::state::FlashState;

/// Flash state plus the single pending reset that returns it to idle.
///
/// Times are offsets from the window's start; the caller drives the clock
/// through [`FlashTimer::trigger`] and [`FlashTimer::tick`].
#[derive(Debug)]
pub struct FlashTimer {
    state: FlashState,
    duration: Duration,
    reset_at: Option<Duration>,
}

impl FlashTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: FlashState::Idle,
            duration,
            reset_at: None,
        }
    }

    pub fn state(&self) -> FlashState {
        self.state
    }

    pub fn is_flashing(&self) -> bool {
        self.state == FlashState::Flashing
    }

    pub fn pending_reset(&self) -> Option<Duration> {
        self.reset_at
    }

    /// Enters `Flashing` and re-arms the reset, replacing any earlier one.
    pub fn trigger(&mut self, now: Duration) {
        self.state = FlashState::Flashing;
        self.cancel();
        self.reset_at = Some(now + self.duration);
    }

    /// Fires the pending reset once its deadline has passed. Returns true when it fired.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.reset_at = None;
                self.state = FlashState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.reset_at = None;
    }

    /// Back to `Idle` with nothing pending.
    pub fn reset(&mut self) {
        self.cancel();
        self.state = FlashState::Idle;
    }
}
