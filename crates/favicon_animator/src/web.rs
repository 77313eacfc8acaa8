//! Browser binding: DOM-backed collaborators and the wasm entry point.

use std::cell::RefCell;
use std::time::Duration;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlLinkElement, Window,
};

use crate::animator::{Collaborators, FaviconAnimator};
use crate::config::AnimatorConfig;
use crate::error::{SetupError, SurfaceError, TickerError};
use crate::geometry::Point;
use crate::host::{FaviconLink, Ticker, TriggerElement};
use crate::surface::{DrawingSurface, StrokeStyle};

/// Log directive installed by [`start`].
const LOG_FILTER: &str = "favicon_animator=info";

pub type PageAnimator = FaviconAnimator<CanvasSurface, ButtonTrigger, LinkFavicon, IntervalTicker>;

thread_local! {
    static ANIMATOR: RefCell<Option<PageAnimator>> = const { RefCell::new(None) };
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `<canvas>` with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, SetupError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| SetupError::MissingContext)?
            .ok_or(SetupError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::MissingContext)?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawingSurface for CanvasSurface {
    fn resize(&mut self, size: u32) {
        self.canvas.set_width(size);
        self.canvas.set_height(size);
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) -> Result<(), SurfaceError> {
        let g = &style.gradient;
        let gradient = self.context.create_linear_gradient(
            g.from.x as f64,
            g.from.y as f64,
            g.to.x as f64,
            g.to.y as f64,
        );
        gradient
            .add_color_stop(0.0, &g.start.to_css())
            .map_err(|err| SurfaceError::Gradient(js_error(&err)))?;
        gradient
            .add_color_stop(1.0, &g.end.to_css())
            .map_err(|err| SurfaceError::Gradient(js_error(&err)))?;
        self.context.set_stroke_style_canvas_gradient(&gradient);
        self.context.set_line_width(style.width as f64);
        Ok(())
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.context.move_to(point.x as f64, point.y as f64);
    }

    fn line_to(&mut self, point: Point) {
        self.context.line_to(point.x as f64, point.y as f64);
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url()
            .map_err(|err| SurfaceError::Encode(js_error(&err)))
    }
}

/// Button-like element; listeners live as long as the trigger.
pub struct ButtonTrigger {
    element: HtmlElement,
    listeners: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl ButtonTrigger {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Drop for ButtonTrigger {
    fn drop(&mut self) {
        // A listener left behind would call into a freed closure on the next hover.
        for closure in self.listeners.get_mut().drain(..) {
            if let Err(err) = self.element.remove_event_listener_with_callback(
                "pointerenter",
                closure.as_ref().unchecked_ref(),
            ) {
                debug!(error = %js_error(&err), "could not detach pointerenter listener");
            }
        }
    }
}

impl TriggerElement for ButtonTrigger {
    fn on_pointer_enter(&self, handler: Box<dyn FnMut()>) {
        let closure = Closure::wrap(handler);
        if let Err(err) = self
            .element
            .add_event_listener_with_callback("pointerenter", closure.as_ref().unchecked_ref())
        {
            warn!(error = %js_error(&err), "failed to attach pointerenter listener");
            return;
        }
        self.listeners.borrow_mut().push(closure);
    }

    fn set_disabled(&self, disabled: bool) {
        let result = if disabled {
            self.element.set_attribute("disabled", "")
        } else {
            self.element.remove_attribute("disabled")
        };
        if let Err(err) = result {
            debug!(error = %js_error(&err), disabled, "could not toggle disabled attribute");
        }
    }
}

pub struct LinkFavicon {
    link: HtmlLinkElement,
}

impl LinkFavicon {
    pub fn new(link: HtmlLinkElement) -> Self {
        Self { link }
    }
}

impl FaviconLink for LinkFavicon {
    fn set_href(&self, href: &str) {
        self.link.set_href(href);
    }
}

/// `window.setInterval` handle plus the closure it calls.
pub struct IntervalHandle {
    id: i32,
    closure: Closure<dyn FnMut()>,
}

/// Ticker backed by `window.setInterval`.
pub struct IntervalTicker {
    window: Window,
    // Cancelled closures may still be on the stack; freed on the next start.
    retired: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl IntervalTicker {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            retired: RefCell::new(Vec::new()),
        }
    }
}

impl Ticker for IntervalTicker {
    type Handle = IntervalHandle;

    fn start(
        &self,
        interval: Duration,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, TickerError> {
        self.retired.borrow_mut().clear();
        let closure = Closure::wrap(tick);
        let timeout = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|err| TickerError::Rejected(js_error(&err)))?;
        Ok(IntervalHandle { id, closure })
    }

    fn cancel(&self, handle: Self::Handle) {
        self.window.clear_interval_with_handle(handle.id);
        self.retired.borrow_mut().push(handle.closure);
    }
}

/// Find the collaborators in `document`: the first canvas with a 2D context,
/// the first button and the first `link` whose `rel` mentions `icon`.
pub fn locate(document: &Document) -> Collaborators<CanvasSurface, ButtonTrigger, LinkFavicon> {
    let surface = document
        .query_selector("canvas")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| match CanvasSurface::from_canvas(canvas) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!(error = %err, "canvas found but unusable");
                None
            }
        });

    let trigger = document
        .query_selector("button")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .map(ButtonTrigger::new);

    let favicon = document
        .query_selector("link[rel*='icon']")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlLinkElement>().ok())
        .map(LinkFavicon::new);

    Collaborators {
        surface,
        trigger,
        favicon,
    }
}

fn mount(window: Window, document: &Document) {
    let animator = FaviconAnimator::new(
        AnimatorConfig::default(),
        locate(document),
        IntervalTicker::new(window),
    );
    animator.initialize();
    ANIMATOR.with(|slot| *slot.borrow_mut() = Some(animator));
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::logging::init(LOG_FILTER);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        warn!("no document; favicon animation disabled");
        return;
    };

    if document.ready_state() != "loading" {
        mount(window, &document);
        return;
    }

    // Wait for the markup, not for images and other subresources.
    let target = document.clone();
    let on_ready = Closure::once_into_js(move || mount(window, &target));
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        warn!(error = %js_error(&err), "failed to wait for DOMContentLoaded");
    }
}

/// Restart the animation from script, bypassing the trigger element.
#[wasm_bindgen]
pub fn favicon_restart() {
    ANIMATOR.with(|slot| {
        if let Some(animator) = slot.borrow().as_ref() {
            animator.start();
        }
    });
}

#[wasm_bindgen]
pub fn favicon_diagnostics_json() -> String {
    ANIMATOR.with(|slot| match slot.borrow().as_ref() {
        Some(animator) => animator.diagnostics().to_json(),
        None => "{\"phase\":\"unmounted\",\"detail\":\"favicon animator not mounted\"}".to_string(),
    })
}
