//! Web-specific binding of the counter animator to the DOM.
//!
//! Visibility detection stays with the page: its intersection observer (or
//! the immediate-reveal fallback) calls [`CounterController::reveal`] once
//! per element.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::{
    CounterAnimator, CounterOptions, FrameHost, RevealSettings, RevealStyle, Trigger, READY_CLASS,
    REVEAL_SELECTOR, VISIBLE_CLASS,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Read the platform's "prefers reduced motion" media query.
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Dataset lookup for an element, usable with [`CounterOptions::from_dataset`].
pub fn dataset_lookup(element: &HtmlElement) -> impl Fn(&str) -> Option<String> {
    let dataset = element.dataset();
    move |key: &str| dataset.get(key)
}

/// Copy `data-duration`/`data-delay`/`data-distance`/`data-ease` onto the
/// element as `--reveal-*` custom properties.
pub fn apply_reveal_style(element: &HtmlElement) -> Result<(), String> {
    let style = RevealStyle::from_dataset(dataset_lookup(element));
    let css = element.style();
    for (name, value) in style.css_properties() {
        css.set_property(name, &value)
            .map_err(|_| format!("Failed to set {name}"))?;
    }
    Ok(())
}

/// What controller setup reads from and writes to a `.reveal` element.
trait RevealTarget {
    fn data(&self, key: &str) -> Option<String>;
    fn text(&self) -> String;
    fn apply_style(&self) -> Result<(), String>;
}

impl RevealTarget for HtmlElement {
    fn data(&self, key: &str) -> Option<String> {
        self.dataset().get(key)
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn apply_style(&self) -> Result<(), String> {
        apply_reveal_style(self)
    }
}

/// Apply style overrides and register opted-in counters.
///
/// A style that cannot be applied is logged; the element still counts.
fn register_counters<E: RevealTarget>(
    animator: &mut CounterAnimator<usize>,
    elements: &[E],
    settings: &RevealSettings,
) {
    for (index, element) in elements.iter().enumerate() {
        if let Err(err) = element.apply_style() {
            tracing::warn!(index, "{}", err);
        }
        if let Some(options) = CounterOptions::from_dataset_with(|key| element.data(key), settings) {
            animator.register_with(index, &element.text(), &options);
        }
    }
}

/// Id of the outstanding `requestAnimationFrame` request.
#[derive(Debug, Default)]
struct PendingFrame(Option<i32>);

impl PendingFrame {
    fn record(&mut self, id: i32) {
        self.0 = Some(id);
    }

    /// The browser ran the callback; its id is no longer cancellable.
    fn fired(&mut self) {
        self.0 = None;
    }

    fn take(&mut self) -> Option<i32> {
        self.0.take()
    }
}

/// [`FrameHost`] over a fixed list of elements, keyed by index.
pub struct DomHost {
    elements: Vec<HtmlElement>,
    frame_callback: FrameCallback,
    pending: PendingFrame,
}

impl FrameHost<usize> for DomHost {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn request_frame(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>()) {
                Ok(id) => self.pending.record(id),
                Err(_) => tracing::warn!("requestAnimationFrame failed"),
            }
        }
    }

    fn set_text(&mut self, key: &usize, text: &str) {
        if let Some(element) = self.elements.get(*key) {
            element.set_text_content(Some(text));
        }
    }
}

struct Inner {
    animator: CounterAnimator<usize>,
    host: DomHost,
}

/// Counters for every `.reveal` element on the page.
pub struct CounterController {
    inner: Rc<RefCell<Inner>>,
}

impl CounterController {
    /// Collect `.reveal` elements, apply their style overrides and register
    /// the ones that opted into counting.
    pub fn new(settings: &RevealSettings) -> Result<Self, String> {
        let window = web_sys::window().ok_or("No window available")?;
        let document = window.document().ok_or("No document available")?;
        let nodes = document
            .query_selector_all(REVEAL_SELECTOR)
            .map_err(|_| "Failed to query reveal elements")?;

        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                elements.push(element);
            }
        }

        let mut animator = CounterAnimator::new(settings.reduced_motion(prefers_reduced_motion()));
        register_counters(&mut animator, &elements, settings);
        tracing::debug!(elements = elements.len(), counters = animator.len(), "reveal initialised");

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let inner = Rc::new(RefCell::new(Inner {
            animator,
            host: DomHost {
                elements,
                frame_callback: Rc::clone(&frame_callback),
                pending: PendingFrame::default(),
            },
        }));

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&inner);
        *frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                let mut guard = inner.borrow_mut();
                let Inner { animator, host } = &mut *guard;
                host.pending.fired();
                animator.on_frame(host);
            }
        }));

        if let Some(root) = document.document_element() {
            root.class_list()
                .add_1(READY_CLASS)
                .map_err(|_| "Failed to mark document ready")?;
        }

        Ok(Self { inner })
    }

    /// Mark element `index` visible and start its counter, if it has one.
    pub fn reveal(&self, index: usize) -> Trigger {
        let mut guard = self.inner.borrow_mut();
        let Inner { animator, host } = &mut *guard;
        if let Some(element) = host.elements.get(index) {
            if element.class_list().add_1(VISIBLE_CLASS).is_err() {
                tracing::warn!(index, "failed to add visible class");
            }
        }
        animator.trigger(host, &index)
    }

    /// Reveal every element at once (reduced motion or no observer support).
    pub fn reveal_all(&self) {
        for index in 0..self.len() {
            self.reveal(index);
        }
    }

    /// Element at `index`, for wiring up an intersection observer.
    pub fn element(&self, index: usize) -> Option<HtmlElement> {
        self.inner.borrow().host.elements.get(index).cloned()
    }

    /// Number of `.reveal` elements found.
    pub fn len(&self) -> usize {
        self.inner.borrow().host.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for CounterController {
    /// Cancel the outstanding frame so the browser never calls the freed
    /// callback.
    fn drop(&mut self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            return;
        };
        let Some(id) = inner.host.pending.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if window.cancel_animation_frame(id).is_err() {
                tracing::warn!(id, "cancelAnimationFrame failed");
            }
        }
    }
}
