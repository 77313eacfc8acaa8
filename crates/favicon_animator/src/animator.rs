//! The favicon animator: hover starts a timed run that traces the outline
//! frame by frame and republishes the surface as the favicon.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::config::AnimatorConfig;
use crate::diagnostics::{AnimatorDiagnostics, Phase};
use crate::error::SetupError;
use crate::host::{FaviconLink, Ticker, TriggerElement};
use crate::outline::{Outline, Stage};
use crate::state::{AnimationState, TickOutcome};
use crate::surface::DrawingSurface;

/// The page objects an animator drives. Any of them may be absent; a
/// missing one makes [`FaviconAnimator::initialize`] fail.
pub struct Collaborators<S, T, L> {
    pub surface: Option<S>,
    pub trigger: Option<T>,
    pub favicon: Option<L>,
}

impl<S, T, L> Default for Collaborators<S, T, L> {
    fn default() -> Self {
        Self {
            surface: None,
            trigger: None,
            favicon: None,
        }
    }
}

impl<S, T, L> Collaborators<S, T, L> {
    pub fn new(surface: S, trigger: T, favicon: L) -> Self {
        Self {
            surface: Some(surface),
            trigger: Some(trigger),
            favicon: Some(favicon),
        }
    }

    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_trigger(mut self, trigger: T) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_favicon(mut self, favicon: L) -> Self {
        self.favicon = Some(favicon);
        self
    }

    /// First missing collaborator, in lookup order.
    pub fn missing(&self) -> Option<SetupError> {
        if self.surface.is_none() {
            Some(SetupError::MissingSurface)
        } else if self.trigger.is_none() {
            Some(SetupError::MissingTrigger)
        } else if self.favicon.is_none() {
            Some(SetupError::MissingFavicon)
        } else {
            None
        }
    }
}

struct Inner<S, T, L, K: Ticker> {
    config: AnimatorConfig,
    parts: Collaborators<S, T, L>,
    ticker: K,
    state: AnimationState<K::Handle>,
    phase: Phase,
    frames_published: u64,
    last_error: Option<String>,
}

impl<S, T, L, K: Ticker> Drop for Inner<S, T, L, K> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.take_timer() {
            self.ticker.cancel(timer);
        }
    }
}

/// Hover-driven favicon animation.
///
/// Owns the progress counter, the timer handle and the collaborators. Event
/// and timer callbacks hold weak references, so dropping the animator stops
/// any run in flight.
pub struct FaviconAnimator<S, T, L, K>
where
    S: DrawingSurface + 'static,
    T: TriggerElement + 'static,
    L: FaviconLink + 'static,
    K: Ticker + 'static,
{
    inner: Rc<RefCell<Inner<S, T, L, K>>>,
}

impl<S, T, L, K> FaviconAnimator<S, T, L, K>
where
    S: DrawingSurface + 'static,
    T: TriggerElement + 'static,
    L: FaviconLink + 'static,
    K: Ticker + 'static,
{
    pub fn new(config: AnimatorConfig, parts: Collaborators<S, T, L>, ticker: K) -> Self {
        let total_ticks = config.total_ticks;
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                parts,
                ticker,
                state: AnimationState::new(total_ticks),
                phase: Phase::Uninitialized,
                frames_published: 0,
                last_error: None,
            })),
        }
    }

    /// Arm the animation. Returns `false` (and logs why) if a collaborator
    /// is missing or the configuration is unusable.
    pub fn initialize(&self) -> bool {
        match self.try_initialize() {
            Ok(()) => {
                info!("favicon animator ready");
                true
            }
            Err(err) => {
                warn!(error = %err, "favicon animator disabled");
                let mut inner = self.inner.borrow_mut();
                inner.phase = Phase::Failed;
                inner.last_error = Some(err.to_string());
                false
            }
        }
    }

    /// Typed form of [`initialize`](Self::initialize).
    ///
    /// Every collaborator is checked before anything is touched, so a failed
    /// call leaves the page as it found it.
    pub fn try_initialize(&self) -> Result<(), SetupError> {
        let weak = Rc::downgrade(&self.inner);
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        if inner.phase.is_armed() {
            debug!("favicon animator already initialized");
            return Ok(());
        }

        inner.config.validate()?;
        if let Some(missing) = inner.parts.missing() {
            return Err(missing);
        }
        let (Some(surface), Some(trigger)) =
            (inner.parts.surface.as_mut(), inner.parts.trigger.as_ref())
        else {
            return Err(SetupError::MissingSurface);
        };

        surface.resize(inner.config.size);
        surface.set_stroke_style(&inner.config.stroke_style())?;

        trigger.set_disabled(false);
        trigger.on_pointer_enter(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::start_run(&inner);
            }
        }));

        inner.phase = Phase::Ready;
        inner.last_error = None;
        debug!(
            size = inner.config.size,
            total_ticks = inner.config.total_ticks,
            interval_ms = inner.config.tick_interval.as_millis() as u64,
            "favicon surface configured"
        );
        Ok(())
    }

    /// Start a run as if the trigger had been hovered.
    pub fn start(&self) {
        Self::start_run(&self.inner);
    }

    /// Draw and publish one frame, then advance. Does nothing unless a run is
    /// in flight.
    pub fn tick(&self) {
        Self::draw_frame(&self.inner);
    }

    pub fn progress(&self) -> u32 {
        self.inner.borrow().state.progress()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().state.is_running()
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    pub fn stage(&self) -> Stage {
        let inner = self.inner.borrow();
        Stage::for_progress(inner.state.progress(), inner.state.total_ticks())
    }

    pub fn config(&self) -> AnimatorConfig {
        self.inner.borrow().config.clone()
    }

    pub fn diagnostics(&self) -> AnimatorDiagnostics {
        let inner = self.inner.borrow();
        AnimatorDiagnostics {
            phase: inner.phase,
            progress: inner.state.progress(),
            stage: Stage::for_progress(inner.state.progress(), inner.state.total_ticks()),
            running: inner.state.is_running(),
            frames_published: inner.frames_published,
            last_error: inner.last_error.clone(),
            config: inner.config.clone(),
        }
    }

    fn start_run(cell: &Rc<RefCell<Inner<S, T, L, K>>>) {
        let weak: Weak<RefCell<Inner<S, T, L, K>>> = Rc::downgrade(cell);
        let mut guard = cell.borrow_mut();
        let inner = &mut *guard;

        if !inner.phase.is_armed() {
            debug!(phase = ?inner.phase, "ignoring trigger on an unarmed animator");
            return;
        }

        // One timer per animator: a hover during a run restarts it.
        if let Some(previous) = inner.state.take_timer() {
            debug!(
                progress = inner.state.progress(),
                "restarting favicon animation in flight"
            );
            inner.ticker.cancel(previous);
        }
        inner.state.restart();

        let tick: Box<dyn FnMut()> = Box::new(move || {
            if let Some(cell) = weak.upgrade() {
                Self::draw_frame(&cell);
            }
        });
        match inner.ticker.start(inner.config.tick_interval, tick) {
            Ok(timer) => {
                inner.state.attach(timer);
                inner.phase = Phase::Running;
                if let Some(trigger) = inner.parts.trigger.as_ref() {
                    trigger.set_disabled(true);
                }
                debug!("favicon animation started");
            }
            Err(err) => {
                warn!(error = %err, "could not schedule favicon animation");
                inner.last_error = Some(err.to_string());
                inner.phase = Phase::Ready;
            }
        }
    }

    fn draw_frame(cell: &Rc<RefCell<Inner<S, T, L, K>>>) {
        let mut guard = cell.borrow_mut();
        let inner = &mut *guard;

        if !inner.state.is_running() {
            return;
        }
        let (Some(surface), Some(favicon)) =
            (inner.parts.surface.as_mut(), inner.parts.favicon.as_ref())
        else {
            return;
        };

        let outline = Outline::at(
            inner.state.progress(),
            inner.config.size,
            inner.config.total_ticks,
        );
        surface.clear();
        surface.begin_path();
        outline.trace(surface);
        surface.stroke();

        match surface.to_data_url() {
            Ok(url) => {
                favicon.set_href(&url);
                inner.frames_published += 1;
            }
            Err(err) => {
                warn!(
                    error = %err,
                    progress = inner.state.progress(),
                    "skipping favicon frame"
                );
                inner.last_error = Some(err.to_string());
            }
        }

        if inner.state.advance() == TickOutcome::Finished {
            if let Some(timer) = inner.state.take_timer() {
                inner.ticker.cancel(timer);
            }
            inner.phase = Phase::Finished;
            info!(frames = inner.frames_published, "favicon animation finished");
        }
    }
}
