//! Browser side of the presentation traits.
//!
//! `Elements::bind()` resolves every element the page script relies on once at
//! boot. Adapter structs wrap the `web_sys` handles and implement the effect
//! traits; DOM exceptions inside trait methods are logged and dropped.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlFormElement, NodeList, Window, window,
};

use crate::contact::{ContactSurface, Notification, Notifier};
use crate::counter::{BarSlot, NumberSlot};
use crate::cursor::{CursorSurface, translate};
use crate::error::{FxError, describe_js};
use crate::loading::LoadingSurface;
use crate::nav::{NavSurface, SectionBox};
use crate::particles::{ParticleLayer, ParticleSpec};
use crate::theme::{Theme, ThemeSurface};
use crate::typing::TextSlot;

pub const ACTIVE_CLASS: &str = "active";
pub const HOVER_SELECTOR: &str = "a, button, .btn, .project-card, .skill-item";
pub const FORM_INPUT_SELECTOR: &str = ".form-group input, .form-group textarea";

// --- Element binding ---------------------------------------------------------

pub struct Elements {
    pub window: Window,
    pub document: Document,
    pub root: Element,
    pub body: HtmlElement,
    pub loading_screen: HtmlElement,
    pub navbar: HtmlElement,
    pub nav_toggle: HtmlElement,
    pub nav_menu: HtmlElement,
    pub theme_toggle: HtmlElement,
    pub contact_form: HtmlFormElement,
    pub success_modal: HtmlElement,
    pub particles: HtmlElement,
    // The page may omit these; their effects are skipped.
    pub typing_text: Option<HtmlElement>,
    pub cursor_dot: Option<HtmlElement>,
    pub cursor_outline: Option<HtmlElement>,
}

impl Elements {
    pub fn bind() -> Result<Self, FxError> {
        let window = window().ok_or(FxError::MissingElement("window"))?;
        let document = window.document().ok_or(FxError::MissingElement("document"))?;
        let root = document.document_element().ok_or(FxError::MissingElement("<html>"))?;
        let body = document.body().ok_or(FxError::MissingElement("<body>"))?;

        Ok(Self {
            loading_screen: by_id(&document, "loadingScreen")?,
            navbar: by_id(&document, "navbar")?,
            nav_toggle: by_id(&document, "navToggle")?,
            nav_menu: by_id(&document, "navMenu")?,
            theme_toggle: by_id(&document, "themeToggle")?,
            contact_form: by_id(&document, "contactForm")?,
            success_modal: by_id(&document, "successModal")?,
            particles: by_id(&document, "particles")?,
            typing_text: query_one(&document, ".typing-text")?,
            cursor_dot: by_id(&document, "cursorDot").ok(),
            cursor_outline: by_id(&document, "cursorOutline").ok(),
            window,
            document,
            root,
            body,
        })
    }
}

fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, FxError> {
    doc.get_element_by_id(id)
        .ok_or(FxError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| FxError::Dom(format!("#{id} has an unexpected element type")))
}

fn query_one(doc: &Document, selector: &str) -> Result<Option<HtmlElement>, FxError> {
    Ok(doc.query_selector(selector)?.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, FxError> {
    Ok(collect(doc.query_selector_all(selector)?))
}

pub fn query_all_html(doc: &Document, selector: &str) -> Result<Vec<HtmlElement>, FxError> {
    Ok(query_all(doc, selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn viewport_width(window: &Window) -> f64 {
    window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn soft(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        warn!("event=dom_write module=dom status=error op={what} error=\"{}\"", describe_js(&err));
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    soft(el.class_list().toggle_with_force(class, on).map(|_| ()), class);
}

// --- Listeners, timers, frames ---------------------------------------------------

/// Registers `handler` for `event` on `target` for the page's lifetime.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), FxError>
where
    E: JsCast + 'static,
{
    let closure = event_closure(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// [`listen`] with an explicit `passive` flag.
pub fn listen_passive<E>(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: impl FnMut(E) + 'static,
) -> Result<(), FxError>
where
    E: JsCast + 'static,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(passive);
    let closure = event_closure(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    closure.forget();
    Ok(())
}

fn event_closure<E>(mut handler: impl FnMut(E) + 'static) -> Closure<dyn FnMut(web_sys::Event)>
where
    E: JsCast + 'static,
{
    Closure::wrap(Box::new(move |evt: web_sys::Event| handler(evt.unchecked_into::<E>()))
        as Box<dyn FnMut(web_sys::Event)>)
}

pub fn set_timeout(
    window: &Window,
    delay_ms: u32,
    f: impl FnOnce() + 'static,
) -> Result<i32, FxError> {
    let cb = Closure::once_into_js(f);
    let ms = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    Ok(window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)?)
}

/// [`set_timeout`], logging instead of propagating a scheduling failure.
pub fn after(window: &Window, delay_ms: u32, f: impl FnOnce() + 'static) {
    if let Err(err) = set_timeout(window, delay_ms, f) {
        warn!("event=timer module=dom status=error error=\"{err}\"");
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `step` once per display frame until it returns `false`.
pub fn frame_loop(mut step: impl FnMut(f64) -> bool + 'static) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !step(ts) {
            // Breaks the Rc cycle; wasm-bindgen frees the closure after it returns.
            let _ = f.borrow_mut().take();
            return;
        }
        if let Some(cb) = f.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        request_frame(cb);
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
    let Some(w) = window() else {
        warn!("event=frame module=dom status=error error=\"no window\"");
        return;
    };
    let requested = w.request_animation_frame(cb.as_ref().unchecked_ref());
    soft(requested.map(|_| ()), "request-frame");
}

/// Apple touch devices get the touchstart guard.
pub fn is_ios_user_agent(ua: &str) -> bool {
    ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d))
}

// --- Adapters ----------------------------------------------------------------

#[derive(Clone)]
pub struct TextNode(pub HtmlElement);

impl TextSlot for TextNode {
    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

#[derive(Clone)]
pub struct CounterNode(pub HtmlElement);

impl NumberSlot for CounterNode {
    fn set_number(&mut self, value: u32) {
        self.0.set_text_content(Some(&value.to_string()));
    }
}

#[derive(Clone)]
pub struct ProgressNode(pub HtmlElement);

impl ProgressNode {
    pub fn has_width(&self) -> bool {
        self.0.style().get_property_value("width").map(|w| !w.is_empty()).unwrap_or(false)
    }
}

impl BarSlot for ProgressNode {
    fn set_fill_percent(&mut self, percent: u32) {
        soft(self.0.style().set_property("width", &format!("{percent}%")), "skill-width");
    }
}

#[derive(Clone)]
pub struct CursorNodes {
    pub dot: HtmlElement,
    pub outline: HtmlElement,
}

impl CursorSurface for CursorNodes {
    fn place_dot(&mut self, x: f64, y: f64) {
        soft(self.dot.style().set_property("transform", &translate(x, y)), "cursor-dot");
    }

    fn place_outline(&mut self, x: f64, y: f64) {
        soft(self.outline.style().set_property("transform", &translate(x, y)), "cursor-outline");
    }

    fn set_hover(&mut self, hovering: bool) {
        set_class(&self.outline, "hover", hovering);
    }
}

#[derive(Clone)]
pub struct ParticleContainer {
    pub document: Document,
    pub container: HtmlElement,
}

impl ParticleLayer for ParticleContainer {
    fn clear(&mut self) {
        self.container.set_inner_html("");
    }

    fn spawn(&mut self, spec: &ParticleSpec) {
        let created = self.document.create_element("div");
        let particle = match created.map(|el| el.unchecked_into::<HtmlElement>()) {
            Ok(el) => el,
            Err(err) => {
                warn!(
                    "event=particle_spawn module=dom status=error error=\"{}\"",
                    describe_js(&err)
                );
                return;
            }
        };
        particle.set_class_name("particle");
        particle.style().set_css_text(&spec.css_text());
        soft(self.container.append_child(&particle).map(|_| ()), "particle-append");
    }
}

#[derive(Clone)]
pub struct RootTheme(pub Element);

impl ThemeSurface for RootTheme {
    fn applied(&self) -> Option<Theme> {
        self.0.get_attribute("data-theme").as_deref().and_then(Theme::from_attr)
    }

    fn apply(&mut self, theme: Theme) {
        soft(self.0.set_attribute("data-theme", theme.as_attr()), "data-theme");
    }
}

#[derive(Clone)]
pub struct NavNodes {
    pub document: Document,
    pub body: HtmlElement,
    pub navbar: HtmlElement,
    pub toggle: HtmlElement,
    pub menu: HtmlElement,
}

impl NavNodes {
    pub fn contains(&self, target: Option<EventTarget>) -> bool {
        let node = target.and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        self.navbar.contains(node.as_ref())
    }

    /// Offsets of every `section[id]`, read fresh on each scroll.
    pub fn sections(&self) -> Vec<SectionBox> {
        query_all_html(&self.document, "section[id]")
            .unwrap_or_default()
            .into_iter()
            .map(|s| SectionBox {
                id: s.id(),
                top: f64::from(s.offset_top()),
                height: f64::from(s.offset_height()),
            })
            .collect()
    }
}

impl NavSurface for NavNodes {
    fn set_menu_open(&mut self, open: bool) {
        set_class(&self.toggle, ACTIVE_CLASS, open);
        set_class(&self.menu, ACTIVE_CLASS, open);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let value = if locked { "hidden" } else { "visible" };
        soft(self.body.style().set_property("overflow", value), "body-overflow");
    }

    fn set_scrolled(&mut self, scrolled: bool) {
        set_class(&self.navbar, "scrolled", scrolled);
    }

    fn mark_active(&mut self, href: &str) {
        for link in query_all(&self.document, ".nav-link").unwrap_or_default() {
            set_class(&link, ACTIVE_CLASS, false);
        }
        let selector = format!("a[href=\"{href}\"]");
        if let Ok(Some(link)) = self.document.query_selector(&selector) {
            set_class(&link, ACTIVE_CLASS, true);
        }
    }
}

#[derive(Clone)]
pub struct ContactNodes {
    pub form: HtmlFormElement,
    pub submit: Option<HtmlElement>,
    pub modal: HtmlElement,
}

impl ContactNodes {
    pub fn new(form: HtmlFormElement, modal: HtmlElement) -> Self {
        let submit = form
            .query_selector(".submit-btn")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self {
            form,
            submit,
            modal,
        }
    }
}

impl ContactSurface for ContactNodes {
    fn set_pending(&mut self, pending: bool) {
        let Some(btn) = &self.submit else { return };
        set_class(btn, "loading", pending);
        if let Some(button) = btn.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(pending);
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }

    fn set_modal_visible(&mut self, visible: bool) {
        set_class(&self.modal, "show", visible);
    }
}

const TOAST_BASE_CSS: &str = "position: fixed; top: 20px; right: 20px; padding: 16px 24px; \
background: var(--bg-glass); border: 1px solid rgba(255, 255, 255, 0.2); border-radius: 12px; \
color: var(--text-primary); font-weight: 500; backdrop-filter: blur(20px); z-index: 10000; \
transform: translateX(100%); transition: transform 0.3s ease;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub enter_ms: u32,
    pub visible_ms: u32,
    pub exit_ms: u32,
}

#[derive(Clone)]
pub struct Toaster {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub timings: ToastTimings,
}

impl Toaster {
    fn build(&self, n: &Notification) -> Result<HtmlElement, FxError> {
        let toast: HtmlElement = self.document.create_element("div")?.unchecked_into();
        toast.set_class_name(n.kind.class_name());
        let style = toast.style();
        style.set_css_text(TOAST_BASE_CSS);
        if let Some((border, background)) = n.kind.palette() {
            style.set_property("border-color", border)?;
            style.set_property("background", background)?;
        }
        toast.set_text_content(Some(&n.message));
        self.body.append_child(&toast)?;
        Ok(toast)
    }
}

impl Notifier for Toaster {
    fn notify(&mut self, notification: &Notification) {
        let toast = match self.build(notification) {
            Ok(t) => t,
            Err(err) => {
                warn!("event=notify module=dom status=error error=\"{err}\"");
                return;
            }
        };
        let t = self.timings;
        let enter = toast.clone();
        after(&self.window, t.enter_ms, move || {
            soft(enter.style().set_property("transform", "translateX(0)"), "toast-enter");
        });
        let w = self.window.clone();
        after(&self.window, t.visible_ms, move || {
            soft(toast.style().set_property("transform", "translateX(100%)"), "toast-exit");
            after(&w, t.exit_ms, move || toast.remove());
        });
    }
}

#[derive(Clone)]
pub struct PageLoading {
    pub body: HtmlElement,
    pub screen: HtmlElement,
}

impl LoadingSurface for PageLoading {
    fn set_body_loading(&mut self, loading: bool) {
        set_class(&self.body, "loading", loading);
    }

    fn hide_loading_screen(&mut self) {
        set_class(&self.screen, "hidden", true);
    }

    fn release_scroll(&mut self) {
        soft(self.body.style().set_property("overflow", "visible"), "body-overflow");
    }
}
