//! Page-owned collaborators: the trigger element, the favicon link and the
//! repeating timer.
//!
//! Implementations are cheap handles onto objects the page owns (DOM nodes,
//! `window` timers). The animator only calls into them; it never creates or
//! destroys the underlying objects.

use std::time::Duration;

use crate::error::TickerError;

/// The hoverable element that starts a run.
pub trait TriggerElement {
    /// Register `handler` for pointer-enter events. Handlers stay attached
    /// for the lifetime of the element.
    fn on_pointer_enter(&self, handler: Box<dyn FnMut()>);

    /// Toggle the non-interactive state shown while a run is in flight.
    fn set_disabled(&self, disabled: bool);
}

/// The `<link rel="icon">` whose target is rewritten every tick.
pub trait FaviconLink {
    fn set_href(&self, href: &str);
}

/// Repeating timer source.
pub trait Ticker {
    /// Token identifying one scheduled timer.
    type Handle: 'static;

    /// Call `tick` every `interval` until the handle is cancelled.
    fn start(
        &self,
        interval: Duration,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, TickerError>;

    /// Stop a timer. Safe to call from inside that timer's own tick.
    fn cancel(&self, handle: Self::Handle);
}
