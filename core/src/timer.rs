use serde::{Deserialize, Serialize};

/// Whole-second game clock advanced by host ticks.
///
/// The timer never reads a clock itself: the host calls [`Timer::tick`] about
/// once per second. Once stopped it stays stopped until [`Timer::reset`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    elapsed_secs: u32,
    state: TimerState,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum TimerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl Timer {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn start(&mut self) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances one second, returns whether the timer was running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }
}
