//! In-memory collaborators for driving an animator without a browser.
//!
//! Every double is a cloneable handle onto shared state, like the DOM
//! handles it stands in for: hand one clone to the animator and keep another
//! to drive events and inspect what happened.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{SurfaceError, TickerError};
use crate::geometry::Point;
use crate::host::{FaviconLink, Ticker, TriggerElement};
use crate::surface::{DrawingSurface, StrokeStyle};

/// Handle returned by [`ManualTicker::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

struct Timer {
    id: u64,
    interval: Duration,
    // `None` while the callback is executing.
    callback: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct TickerState {
    next_id: u64,
    timers: Vec<Timer>,
    started: usize,
    cancelled: usize,
    refuse: bool,
}

/// Ticker whose timers only fire when the test says so.
#[derive(Clone, Default)]
pub struct ManualTicker {
    state: Rc<RefCell<TickerState>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `start` calls fail.
    pub fn refuse_timers(&self, refuse: bool) {
        self.state.borrow_mut().refuse = refuse;
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn started_count(&self) -> usize {
        self.state.borrow().started
    }

    pub fn cancelled_count(&self) -> usize {
        self.state.borrow().cancelled
    }

    pub fn last_interval(&self) -> Option<Duration> {
        self.state.borrow().timers.last().map(|timer| timer.interval)
    }

    /// Fire every active timer once. Returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        let ids: Vec<u64> = self.state.borrow().timers.iter().map(|t| t.id).collect();
        let mut fired = 0;
        for id in ids {
            let callback = {
                let mut state = self.state.borrow_mut();
                state
                    .timers
                    .iter_mut()
                    .find(|timer| timer.id == id)
                    .and_then(|timer| timer.callback.take())
            };
            let Some(mut callback) = callback else {
                continue;
            };
            callback();
            fired += 1;

            // Put it back unless the callback cancelled its own timer.
            let mut state = self.state.borrow_mut();
            if let Some(timer) = state.timers.iter_mut().find(|timer| timer.id == id) {
                timer.callback = Some(callback);
            }
        }
        fired
    }

    /// Fire until no timer is left or `limit` rounds have run.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut rounds = 0;
        while rounds < limit && self.fire() > 0 {
            rounds += 1;
        }
        rounds
    }
}

impl Ticker for ManualTicker {
    type Handle = TimerId;

    fn start(
        &self,
        interval: Duration,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, TickerError> {
        let mut state = self.state.borrow_mut();
        if state.refuse {
            return Err(TickerError::Rejected("timers disabled".into()));
        }
        let id = state.next_id;
        state.next_id += 1;
        state.started += 1;
        state.timers.push(Timer {
            id,
            interval,
            callback: Some(tick),
        });
        Ok(TimerId(id))
    }

    fn cancel(&self, handle: Self::Handle) {
        let mut state = self.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|timer| timer.id != handle.0);
        if state.timers.len() != before {
            state.cancelled += 1;
        }
    }
}

#[derive(Default)]
struct TriggerState {
    handlers: RefCell<Vec<Box<dyn FnMut()>>>,
    disabled: Cell<bool>,
    disable_calls: Cell<usize>,
}

/// Trigger element that records listeners and its disabled flag.
#[derive(Clone, Default)]
pub struct RecordingTrigger {
    state: Rc<TriggerState>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trigger still disabled from an earlier page visit.
    pub fn disabled() -> Self {
        let trigger = Self::default();
        trigger.state.disabled.set(true);
        trigger
    }

    /// Dispatch a pointer-enter event, whether or not the element is
    /// disabled.
    pub fn hover(&self) {
        let mut handlers = std::mem::take(&mut *self.state.handlers.borrow_mut());
        for handler in handlers.iter_mut() {
            handler();
        }
        let mut slot = self.state.handlers.borrow_mut();
        handlers.append(&mut slot);
        *slot = handlers;
    }

    pub fn listener_count(&self) -> usize {
        self.state.handlers.borrow().len()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.disabled.get()
    }

    /// Number of `set_disabled` calls, in either direction.
    pub fn disable_calls(&self) -> usize {
        self.state.disable_calls.get()
    }
}

impl TriggerElement for RecordingTrigger {
    fn on_pointer_enter(&self, handler: Box<dyn FnMut()>) {
        self.state.handlers.borrow_mut().push(handler);
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.disabled.set(disabled);
        self.state.disable_calls.set(self.state.disable_calls.get() + 1);
    }
}

/// Favicon link that keeps every href it was given.
#[derive(Clone, Default)]
pub struct RecordingFavicon {
    hrefs: Rc<RefCell<Vec<String>>>,
}

impl RecordingFavicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_href(&self) -> Option<String> {
        self.hrefs.borrow().last().cloned()
    }

    pub fn update_count(&self) -> usize {
        self.hrefs.borrow().len()
    }
}

impl FaviconLink for RecordingFavicon {
    fn set_href(&self, href: &str) {
        self.hrefs.borrow_mut().push(href.to_string());
    }
}

/// A call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(u32),
    SetStrokeStyle(StrokeStyle),
    Clear,
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}

#[derive(Default)]
struct SurfaceLog {
    commands: Vec<DrawCommand>,
    fail_encoding: bool,
}

/// Surface that records drawing calls instead of rasterizing.
///
/// `to_data_url` returns `data:text/plain,frame-N` where `N` counts strokes.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_encoding(&self, fail: bool) {
        self.log.borrow_mut().fail_encoding = fail;
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.borrow().commands.clone()
    }

    pub fn stroke_count(&self) -> usize {
        self.log
            .borrow()
            .commands
            .iter()
            .filter(|command| **command == DrawCommand::Stroke)
            .count()
    }

    /// Commands issued since the last `Clear`.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        let log = self.log.borrow();
        let start = log
            .commands
            .iter()
            .rposition(|command| *command == DrawCommand::Clear)
            .unwrap_or(0);
        log.commands[start..].to_vec()
    }

    fn push(&self, command: DrawCommand) {
        self.log.borrow_mut().commands.push(command);
    }
}

impl DrawingSurface for RecordingSurface {
    fn resize(&mut self, size: u32) {
        self.push(DrawCommand::Resize(size));
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) -> Result<(), SurfaceError> {
        self.push(DrawCommand::SetStrokeStyle(*style));
        Ok(())
    }

    fn clear(&mut self) {
        self.push(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.push(DrawCommand::LineTo(point));
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        if self.log.borrow().fail_encoding {
            return Err(SurfaceError::Encode("encoding disabled".into()));
        }
        Ok(format!("data:text/plain,frame-{}", self.stroke_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_ticker_tolerates_self_cancel() {
        let ticker = ManualTicker::new();
        let slot: Rc<RefCell<Option<TimerId>>> = Rc::default();
        let fired = Rc::new(Cell::new(0));

        let canceller = ticker.clone();
        let own_slot = slot.clone();
        let counter = fired.clone();
        let handle = ticker
            .start(
                Duration::from_millis(10),
                Box::new(move || {
                    counter.set(counter.get() + 1);
                    if let Some(id) = own_slot.borrow_mut().take() {
                        canceller.cancel(id);
                    }
                }),
            )
            .unwrap();
        *slot.borrow_mut() = Some(handle);

        assert_eq!(ticker.fire(), 1);
        assert_eq!(ticker.active_count(), 0);
        assert_eq!(ticker.fire(), 0);
        assert_eq!(fired.get(), 1);
        assert_eq!(ticker.cancelled_count(), 1);
    }

    #[test]
    fn test_trigger_keeps_handlers_after_hover() {
        let trigger = RecordingTrigger::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        trigger.on_pointer_enter(Box::new(move || counter.set(counter.get() + 1)));

        trigger.hover();
        trigger.hover();
        assert_eq!(hits.get(), 2);
        assert_eq!(trigger.listener_count(), 1);
    }
}
