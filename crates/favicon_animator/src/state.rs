//! Progress counter and timer ownership for a run.

/// What the tick handler should do after drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress advanced; keep the timer.
    Continue,
    /// The final frame was drawn; cancel the timer.
    Finished,
}

/// `progress` plus the handle of the timer driving it.
///
/// Running is derived from holding a handle, so there is never a running
/// state without a timer to cancel.
#[derive(Debug)]
pub struct AnimationState<H> {
    progress: u32,
    total_ticks: u32,
    timer: Option<H>,
}

impl<H> AnimationState<H> {
    pub fn new(total_ticks: u32) -> Self {
        Self {
            progress: 0,
            total_ticks,
            timer: None,
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.total_ticks
    }

    /// Rewind to the first frame. The timer is left alone.
    pub fn restart(&mut self) {
        self.progress = 0;
    }

    /// Take ownership of a freshly scheduled timer.
    pub fn attach(&mut self, timer: H) {
        debug_assert!(self.timer.is_none(), "previous timer must be cancelled first");
        self.timer = Some(timer);
    }

    /// Release the current timer so the caller can cancel it.
    pub fn take_timer(&mut self) -> Option<H> {
        self.timer.take()
    }

    /// Step past the frame just drawn.
    pub fn advance(&mut self) -> TickOutcome {
        if self.is_complete() {
            TickOutcome::Finished
        } else {
            self.progress += 1;
            TickOutcome::Continue
        }
    }
}
