//! Page boot: binds elements and registers every listener, timer, frame loop and
//! observer. Each effect's state sits in its own `Rc<RefCell<_>>`, captured by
//! the closures that drive it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Array;
use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    ErrorEvent, Event, FormData, HtmlElement, HtmlLinkElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MediaQueryListEvent,
    MouseEvent, PromiseRejectionEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::FxConfig;
use crate::contact::{ContactFlow, ContactSubmission, SubmitOutcome};
use crate::counter::{CounterAnimation, SkillBar, Tick, parse_target};
use crate::cursor::CursorFollower;
use crate::dom::{
    self, ContactNodes, CounterNode, CursorNodes, Elements, FORM_INPUT_SELECTOR, HOVER_SELECTOR,
    NavNodes, PageLoading, ParticleContainer, ProgressNode, RootTheme, TextNode, ToastTimings,
    Toaster, after, listen, listen_passive,
};
use crate::error::{Field, FxError, describe_js};
use crate::loading::LoadingSequence;
use crate::nav::{NavMenu, NavTuning, ScrollThrottle};
use crate::particles::{ParticleField, unit_random};
use crate::reveal::{self, CardAction, FollowUp, ObserverOptions};
use crate::theme::ThemeState;
use crate::typing::{Typewriter, TypingSpeeds};

/// Handles kept past boot so JS entrypoints (`close_modal`) can reach them.
struct Page {
    contact: Rc<RefCell<ContactFlow>>,
    contact_nodes: ContactNodes,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Marks the page as started. Holds from the first call on, including while
/// boot waits for `DOMContentLoaded`; a failed boot is not retried.
fn claim_start() -> Result<(), FxError> {
    if STARTED.with(|started| started.replace(true)) {
        return Err(FxError::AlreadyStarted);
    }
    Ok(())
}

/// Boots once the DOM is parsed; defers to `DOMContentLoaded` when called early.
pub fn start(config: FxConfig) -> Result<(), FxError> {
    config.validate()?;
    if let Err(err) = crate::logging::init_logging(&config.log_level) {
        warn!("event=core_init module=app status=degraded error=\"{err}\"");
    }
    claim_start()?;

    let window = web_sys::window().ok_or(FxError::MissingElement("window"))?;
    let document = window.document().ok_or(FxError::MissingElement("document"))?;
    if document.ready_state() == "loading" {
        debug!("event=boot module=app status=deferred");
        let mut config = Some(config);
        listen::<Event>(&document, "DOMContentLoaded", move |_| {
            if let Some(cfg) = config.take() {
                if let Err(err) = boot(cfg) {
                    error!("event=boot module=app status=error error=\"{err}\"");
                }
            }
        })?;
        return Ok(());
    }
    boot(config)
}

fn boot(config: FxConfig) -> Result<(), FxError> {
    let els = Rc::new(Elements::bind()?);
    let cfg = Rc::new(config);

    install_error_handlers(&els.window)?;
    preconnect(&els, &cfg)?;
    guard_ios_touch(&els)?;
    start_loading(&els, &cfg)?;

    let nav = setup_navigation(&els, &cfg)?;
    let contact = setup_contact(&els, &cfg)?;
    setup_keyboard(&els, nav.clone(), contact.clone())?;
    let particles = setup_particles(&els, &cfg);
    setup_resize(&els, nav, particles)?;

    let stats = Rc::new(Stats::collect(&els, &cfg)?);
    setup_section_reveal(&els, &cfg, stats.clone())?;
    setup_card_reveal(&els, &cfg)?;
    start_typing(&els, &cfg);
    setup_cursor(&els, &cfg)?;
    setup_theme(&els, &cfg)?;
    stats.animate_skill_bars();
    stats.animate_counters();

    PAGE.with(|p| {
        *p.borrow_mut() = Some(Page {
            contact,
            contact_nodes: ContactNodes::new(els.contact_form.clone(), els.success_modal.clone()),
        });
    });
    info!(
        "event=boot module=app status=ok phrases={} particles={}",
        cfg.phrases.len(),
        cfg.particle_count
    );
    Ok(())
}

/// Hides the success modal; no-op before boot or when already hidden.
pub fn close_modal() {
    PAGE.with(|p| {
        if let Some(page) = p.borrow_mut().as_mut() {
            page.contact.borrow_mut().dismiss_modal(&mut page.contact_nodes);
        }
    });
}

// --- Process boundary --------------------------------------------------------

fn install_error_handlers(window: &Window) -> Result<(), FxError> {
    listen::<ErrorEvent>(window, "error", |evt| {
        let detail = evt.error();
        let msg = if detail.is_undefined() || detail.is_null() {
            evt.message()
        } else {
            describe_js(&detail)
        };
        error!("event=uncaught module=app status=error error=\"{msg}\"");
    })?;
    listen::<PromiseRejectionEvent>(window, "unhandledrejection", |evt| {
        error!(
            "event=unhandled_rejection module=app status=error reason=\"{}\"",
            describe_js(&evt.reason())
        );
        evt.prevent_default();
    })
}

fn preconnect(els: &Elements, cfg: &FxConfig) -> Result<(), FxError> {
    let Some(head) = els.document.head() else {
        return Ok(());
    };
    for origin in &cfg.preconnect_origins {
        let link: HtmlLinkElement = els.document.create_element("link")?.unchecked_into();
        link.set_rel("preconnect");
        link.set_href(&origin.href);
        if origin.cross_origin {
            link.set_cross_origin(Some("anonymous"));
        }
        head.append_child(&link)?;
    }
    Ok(())
}

fn guard_ios_touch(els: &Elements) -> Result<(), FxError> {
    let ua = els.window.navigator().user_agent().unwrap_or_default();
    if !dom::is_ios_user_agent(&ua) {
        return Ok(());
    }
    listen_passive::<Event>(&els.document, "touchstart", false, |evt| {
        let tag = evt
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| el.tag_name())
            .unwrap_or_default();
        if tag != "INPUT" && tag != "TEXTAREA" {
            evt.prevent_default();
        }
    })
}

// --- Loader ------------------------------------------------------------------

fn start_loading(els: &Elements, cfg: &FxConfig) -> Result<(), FxError> {
    let seq = Rc::new(RefCell::new(LoadingSequence::new(cfg.loading_delay_ms)));
    let surface = PageLoading {
        body: els.body.clone(),
        screen: els.loading_screen.clone(),
    };

    let delay = seq.borrow_mut().boot(&mut surface.clone());
    {
        let seq = seq.clone();
        let mut surface = surface.clone();
        after(&els.window, delay, move || {
            seq.borrow_mut().delay_elapsed(&mut surface)
        });
    }
    if els.document.ready_state() == "complete" {
        seq.borrow_mut().window_loaded(&mut surface.clone());
        return Ok(());
    }
    let mut surface = surface;
    listen::<Event>(&els.window, "load", move |_| {
        seq.borrow_mut().window_loaded(&mut surface)
    })
}

// --- Navigation --------------------------------------------------------------

fn nav_nodes(els: &Elements) -> NavNodes {
    NavNodes {
        document: els.document.clone(),
        body: els.body.clone(),
        navbar: els.navbar.clone(),
        toggle: els.nav_toggle.clone(),
        menu: els.nav_menu.clone(),
    }
}

fn setup_navigation(
    els: &Rc<Elements>,
    cfg: &FxConfig,
) -> Result<Rc<RefCell<NavMenu>>, FxError> {
    let nav = Rc::new(RefCell::new(NavMenu::new(NavTuning {
        mobile_breakpoint: cfg.mobile_breakpoint,
        scrolled_offset: cfg.navbar_scrolled_offset,
        probe_offset: cfg.section_probe_offset,
        anchor_offset: cfg.nav_scroll_offset,
    })));

    {
        let nav = nav.clone();
        let mut nodes = nav_nodes(els);
        listen::<MouseEvent>(&els.nav_toggle, "click", move |_| {
            nav.borrow_mut().toggle(&mut nodes);
        })?;
    }
    {
        let nav = nav.clone();
        let mut nodes = nav_nodes(els);
        listen::<MouseEvent>(&els.document, "click", move |evt| {
            let inside = nodes.contains(evt.target());
            nav.borrow_mut().clicked(inside, &mut nodes);
        })?;
    }

    for link in dom::query_all(&els.document, "a[href^=\"#\"]")? {
        let nav = nav.clone();
        let els = els.clone();
        let mut nodes = nav_nodes(&els);
        let href = link.get_attribute("href").unwrap_or_default();
        listen::<MouseEvent>(&link, "click", move |evt| {
            evt.prevent_default();
            // A bare "#" is not a valid selector; treat it like a missing target.
            let target = els.document.query_selector(&href).ok().flatten();
            let Some(target) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
                return;
            };
            let top = nav.borrow().anchor_scroll_top(f64::from(target.offset_top()));
            let opts = ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(ScrollBehavior::Smooth);
            els.window.scroll_to_with_scroll_to_options(&opts);
            nav.borrow_mut().anchor_followed(&href, &mut nodes);
        })?;
    }

    let throttle = Rc::new(RefCell::new(ScrollThrottle::default()));
    let nav_for_scroll = nav.clone();
    let window = els.window.clone();
    let nodes = nav_nodes(els);
    let window_ms = cfg.scroll_throttle_ms;
    listen_passive::<Event>(&els.window, "scroll", true, move |_| {
        if !throttle.borrow_mut().request() {
            return;
        }
        let throttle = throttle.clone();
        let nav = nav_for_scroll.clone();
        let window_inner = window.clone();
        let mut nodes = nodes.clone();
        after(&window, window_ms, move || {
            throttle.borrow_mut().fired();
            let scroll_y = window_inner.scroll_y().unwrap_or(0.0);
            let sections = nodes.sections();
            nav.borrow_mut().scrolled_to(scroll_y, &sections, &mut nodes);
        });
    })?;

    Ok(nav)
}

// --- Contact form ------------------------------------------------------------

fn read_submission(form: &web_sys::HtmlFormElement) -> Result<ContactSubmission, FxError> {
    let data = FormData::new_with_form(form)?;
    let get = |field: Field| data.get(field.form_name()).as_string().unwrap_or_default();
    Ok(ContactSubmission {
        name: get(Field::Name),
        email: get(Field::Email),
        subject: get(Field::Subject),
        message: get(Field::Message),
    })
}

fn blur_inputs(document: &web_sys::Document) {
    for input in dom::query_all_html(document, FORM_INPUT_SELECTOR).unwrap_or_default() {
        let _ = input.blur();
    }
}

fn setup_contact(
    els: &Rc<Elements>,
    cfg: &FxConfig,
) -> Result<Rc<RefCell<ContactFlow>>, FxError> {
    let flow = Rc::new(RefCell::new(ContactFlow::new(cfg.submit_delay_ms)));
    let nodes = ContactNodes::new(els.contact_form.clone(), els.success_modal.clone());
    let mut toaster = Toaster {
        window: els.window.clone(),
        document: els.document.clone(),
        body: els.body.clone(),
        timings: ToastTimings {
            enter_ms: cfg.notification_enter_ms,
            visible_ms: cfg.notification_visible_ms,
            exit_ms: cfg.notification_exit_ms,
        },
    };
    let blur_delay = cfg.label_blur_delay_ms;

    let handle = flow.clone();
    let els_inner = els.clone();
    listen::<Event>(&els.contact_form, "submit", move |evt| {
        evt.prevent_default();
        let submission = match read_submission(&els_inner.contact_form) {
            Ok(s) => s,
            Err(err) => {
                warn!("event=contact_submit module=app status=error error=\"{err}\"");
                return;
            }
        };
        let mut surface = nodes.clone();
        let outcome = handle
            .borrow_mut()
            .submit(&submission, &mut surface, &mut toaster);
        if let SubmitOutcome::Pending { delay_ms } = outcome {
            let flow = handle.clone();
            let els = els_inner.clone();
            after(&els_inner.window, delay_ms, move || {
                if flow.borrow_mut().complete(&mut surface) {
                    let document = els.document.clone();
                    after(&els.window, blur_delay, move || blur_inputs(&document));
                }
            });
        }
    })?;
    Ok(flow)
}

fn setup_keyboard(
    els: &Elements,
    nav: Rc<RefCell<NavMenu>>,
    contact: Rc<RefCell<ContactFlow>>,
) -> Result<(), FxError> {
    let mut nav_surface = nav_nodes(els);
    let mut contact_surface =
        ContactNodes::new(els.contact_form.clone(), els.success_modal.clone());
    listen::<KeyboardEvent>(&els.document, "keydown", move |evt| {
        if evt.key() != "Escape" {
            return;
        }
        contact.borrow_mut().dismiss_modal(&mut contact_surface);
        nav.borrow_mut().close(&mut nav_surface);
    })
}

// --- Particles / resize ------------------------------------------------------

struct Particles {
    field: RefCell<ParticleField>,
    layer: RefCell<ParticleContainer>,
}

fn setup_particles(els: &Elements, cfg: &FxConfig) -> Rc<Particles> {
    let width = dom::viewport_width(&els.window);
    let field = ParticleField::new(cfg.particle_count, cfg.particle_resize_threshold, width);
    let mut layer = ParticleContainer {
        document: els.document.clone(),
        container: els.particles.clone(),
    };
    field.populate(&mut layer, &mut unit_random);
    Rc::new(Particles {
        field: RefCell::new(field),
        layer: RefCell::new(layer),
    })
}

fn setup_resize(
    els: &Elements,
    nav: Rc<RefCell<NavMenu>>,
    particles: Rc<Particles>,
) -> Result<(), FxError> {
    let window = els.window.clone();
    let mut nodes = nav_nodes(els);
    listen::<Event>(&els.window, "resize", move |_| {
        let width = dom::viewport_width(&window);
        nav.borrow_mut().viewport_resized(width, &mut nodes);
        let mut layer = particles.layer.borrow_mut();
        particles
            .field
            .borrow_mut()
            .resized(width, &mut *layer, &mut unit_random);
    })
}

// --- Counters / skill bars ---------------------------------------------------

struct Stats {
    window: Window,
    skill_delay_ms: u32,
    counters: Vec<(CounterNode, Rc<RefCell<CounterAnimation>>)>,
    bars: Vec<(ProgressNode, Rc<RefCell<SkillBar>>)>,
}

impl Stats {
    fn collect(els: &Elements, cfg: &FxConfig) -> Result<Self, FxError> {
        let mut counters = Vec::new();
        for el in dom::query_all_html(&els.document, ".stat-number")? {
            let raw = el.get_attribute("data-target").unwrap_or_default();
            match parse_target(&raw) {
                Some(target) => counters.push((
                    CounterNode(el),
                    Rc::new(RefCell::new(CounterAnimation::new(target, cfg.counter_steps))),
                )),
                None => {
                    warn!("event=counter_bind module=app status=skipped data_target=\"{raw}\"")
                }
            }
        }

        let mut bars = Vec::new();
        for item in dom::query_all_html(&els.document, ".skill-item")? {
            let raw = item.get_attribute("data-skill").unwrap_or_default();
            let Some(level) = parse_target(&raw) else {
                warn!("event=skill_bind module=app status=skipped data_skill=\"{raw}\"");
                continue;
            };
            let Some(progress) = item
                .query_selector(".skill-progress")?
                .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let node = ProgressNode(progress);
            let bar = if node.has_width() {
                SkillBar::already_filled(level)
            } else {
                SkillBar::new(level)
            };
            bars.push((node, Rc::new(RefCell::new(bar))));
        }

        debug!(
            "event=stats_bind module=app status=ok counters={} bars={}",
            counters.len(),
            bars.len()
        );
        Ok(Self {
            window: els.window.clone(),
            skill_delay_ms: cfg.skill_bar_delay_ms,
            counters,
            bars,
        })
    }

    fn animate_counters(&self) {
        for (node, anim) in &self.counters {
            if !anim.borrow_mut().start() {
                continue;
            }
            let anim = anim.clone();
            let mut node = node.clone();
            dom::frame_loop(move |_| anim.borrow_mut().tick(&mut node) == Tick::Continue);
        }
    }

    fn animate_skill_bars(&self) {
        for (node, bar) in &self.bars {
            if !bar.borrow_mut().schedule() {
                continue;
            }
            let bar = bar.clone();
            let mut node = node.clone();
            after(&self.window, self.skill_delay_ms, move || {
                bar.borrow_mut().fill(&mut node)
            });
        }
    }
}

// --- Reveal observers --------------------------------------------------------

fn observer_init(opts: &ObserverOptions) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(opts.threshold));
    init.set_root_margin(&opts.root_margin);
    init
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observe_with(
    opts: &ObserverOptions,
    callback: ObserverCallback,
) -> Result<IntersectionObserver, FxError> {
    let observer = IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_init(opts),
    )?;
    callback.forget();
    Ok(observer)
}

fn setup_section_reveal(els: &Elements, cfg: &FxConfig, stats: Rc<Stats>) -> Result<(), FxError> {
    let on_entries = move |entries: Array, _obs: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let Some(action) = reveal::section_entry(&target.id(), entry.is_intersecting()) else {
                continue;
            };
            let _ = target.class_list().add_1(reveal::VISIBLE_CLASS);
            match action.follow_up {
                Some(FollowUp::SkillBars) => stats.animate_skill_bars(),
                Some(FollowUp::Counters) => stats.animate_counters(),
                None => {}
            }
        }
    };
    let callback: ObserverCallback =
        Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let observer = observe_with(&ObserverOptions::from_config(cfg), callback)?;

    let mut watched = dom::query_all(&els.document, reveal::SECTION_SELECTOR)?;
    watched.extend(dom::query_all(&els.document, reveal::ITEM_SELECTOR)?);
    for el in &watched {
        el.class_list().add_1(reveal::FADE_IN_CLASS)?;
        observer.observe(el);
    }
    Ok(())
}

fn setup_card_reveal(els: &Elements, cfg: &FxConfig) -> Result<(), FxError> {
    let on_entries = |entries: Array, obs: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if reveal::card_entry(entry.is_intersecting()) == CardAction::Wait {
                continue;
            }
            let target = entry.target();
            if let Some(card) = target.dyn_ref::<HtmlElement>() {
                let _ = card.style().set_property("animation", reveal::CARD_ANIMATION);
            }
            obs.unobserve(&target);
        }
    };
    let callback: ObserverCallback =
        Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let observer = observe_with(&ObserverOptions::from_config(cfg), callback)?;

    for card in dom::query_all_html(&els.document, reveal::CARD_SELECTOR)? {
        let style = card.style();
        style.set_property("opacity", reveal::CARD_HIDDEN_OPACITY)?;
        style.set_property("transform", reveal::CARD_HIDDEN_TRANSFORM)?;
        observer.observe(&card);
    }
    Ok(())
}

// --- Typewriter --------------------------------------------------------------

fn start_typing(els: &Elements, cfg: &FxConfig) {
    let Some(el) = els.typing_text.clone() else {
        debug!("event=typing module=app status=skipped reason=no_slot");
        return;
    };
    let Some(writer) = Typewriter::new(cfg.phrases.clone(), TypingSpeeds::from_config(cfg)) else {
        return;
    };
    type_next(els.window.clone(), Rc::new(RefCell::new(writer)), TextNode(el));
}

fn type_next(window: Window, writer: Rc<RefCell<Typewriter>>, mut slot: TextNode) {
    let delay = writer.borrow_mut().advance(&mut slot);
    let w = window.clone();
    after(&window, delay, move || type_next(w, writer, slot));
}

// --- Cursor ------------------------------------------------------------------

fn setup_cursor(els: &Elements, cfg: &FxConfig) -> Result<(), FxError> {
    let width = dom::viewport_width(&els.window);
    if !CursorFollower::enabled_for_width(width, cfg.cursor_min_width) {
        return Ok(());
    }
    let (Some(dot), Some(outline)) = (els.cursor_dot.clone(), els.cursor_outline.clone()) else {
        debug!("event=cursor module=app status=skipped reason=no_nodes");
        return Ok(());
    };
    let follower = Rc::new(RefCell::new(CursorFollower::new(cfg.cursor_smoothing)));
    let nodes = CursorNodes { dot, outline };

    {
        let follower = follower.clone();
        listen::<MouseEvent>(&els.document, "mousemove", move |evt| {
            let (x, y) = (f64::from(evt.client_x()), f64::from(evt.client_y()));
            follower.borrow_mut().pointer_moved(x, y);
        })?;
    }
    {
        let follower = follower.clone();
        let mut nodes = nodes.clone();
        dom::frame_loop(move |_| {
            follower.borrow_mut().frame(&mut nodes);
            true
        });
    }

    for el in dom::query_all(&els.document, HOVER_SELECTOR)? {
        for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let follower = follower.clone();
            let mut nodes = nodes.clone();
            listen::<MouseEvent>(&el, event, move |_| {
                follower.borrow_mut().hover_changed(hovering, &mut nodes);
            })?;
        }
    }
    Ok(())
}

// --- Theme -------------------------------------------------------------------

fn media_matches(window: &Window, query: &str) -> bool {
    matches!(window.match_media(query), Ok(Some(mql)) if mql.matches())
}

fn setup_theme(els: &Elements, cfg: &FxConfig) -> Result<(), FxError> {
    let state = Rc::new(RefCell::new(ThemeState::new()));
    let root = RootTheme(els.root.clone());

    let prefers_light = media_matches(&els.window, "(prefers-color-scheme: light)");
    let initial = state.borrow().setup(&mut root.clone(), prefers_light);
    debug!("event=theme_setup module=app status=ok theme={initial}");

    {
        let state = state.clone();
        let mut root = root.clone();
        let window = els.window.clone();
        let button = els.theme_toggle.clone();
        let spin_ms = cfg.theme_spin_ms;
        listen::<MouseEvent>(&els.theme_toggle, "click", move |_| {
            let theme = state.borrow_mut().toggle(&mut root);
            debug!("event=theme_toggle module=app status=ok theme={theme}");
            let _ = button.style().set_property("transform", "rotate(360deg)");
            let button = button.clone();
            after(&window, spin_ms, move || {
                let _ = button.style().set_property("transform", "");
            });
        })?;
    }

    if let Ok(Some(mql)) = els.window.match_media("(prefers-color-scheme: dark)") {
        let mut root = root;
        listen::<MediaQueryListEvent>(&mql, "change", move |evt| {
            state.borrow().system_changed(&mut root, evt.matches());
        })?;
    }
    Ok(())
}
