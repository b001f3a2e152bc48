// Browser-only checks for the DOM adapters. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Promise;
use portfolio_fx::contact::{Notification, Notifier};
use portfolio_fx::counter::NumberSlot;
use portfolio_fx::dom::{
    self, CounterNode, NavNodes, ParticleContainer, RootTheme, TextNode, ToastTimings, Toaster,
};
use portfolio_fx::nav::NavSurface;
use portfolio_fx::particles::ParticleField;
use portfolio_fx::theme::{Theme, ThemeState, ThemeSurface};
use portfolio_fx::typing::TextSlot;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn scratch() -> HtmlElement {
    let doc = document();
    let el: HtmlElement = doc.create_element("div").unwrap().unchecked_into();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn text_and_counter_nodes_write_text_content() {
    let el = scratch();
    TextNode(el.clone()).set_text("UI/UX");
    assert_eq!(el.text_content().as_deref(), Some("UI/UX"));
    CounterNode(el.clone()).set_number(42);
    assert_eq!(el.text_content().as_deref(), Some("42"));
}

#[wasm_bindgen_test]
fn root_theme_toggles_data_attribute() {
    let el = scratch();
    let mut root = RootTheme(el.clone().into());
    let mut state = ThemeState::new();
    state.setup(&mut root, true);
    assert_eq!(root.applied(), Some(Theme::Light));
    state.toggle(&mut root);
    assert_eq!(el.get_attribute("data-theme").as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn particle_container_rebuilds_children_on_wide_resize() {
    let container = scratch();
    let mut layer = ParticleContainer {
        document: document(),
        container: container.clone(),
    };
    let mut rng = || 0.5;
    let mut field = ParticleField::new(5, 50.0, 1000.0);
    field.populate(&mut layer, &mut rng);
    assert_eq!(container.child_element_count(), 5);

    let first: HtmlElement = container.first_element_child().unwrap().unchecked_into();
    assert_eq!(first.class_name(), "particle");
    assert_eq!(first.style().get_property_value("left").unwrap(), "50%");

    assert!(!field.resized(1020.0, &mut layer, &mut rng));
    assert!(first.is_connected());
    assert!(field.resized(1200.0, &mut layer, &mut rng));
    assert_eq!(container.child_element_count(), 5);
    assert!(!first.is_connected(), "old particles are discarded");
}

#[wasm_bindgen_test]
fn nav_nodes_move_active_link() {
    let doc = document();
    let nav = scratch();
    nav.set_inner_html(
        "<a class=\"nav-link active\" href=\"#adapter-home\">Home</a>\
         <a class=\"nav-link\" href=\"#adapter-work\">Work</a>",
    );
    let toggle = scratch();
    let menu = scratch();
    let mut nodes = NavNodes {
        document: doc.clone(),
        body: doc.body().unwrap(),
        navbar: nav.clone(),
        toggle: toggle.clone(),
        menu: menu.clone(),
    };

    nodes.mark_active("#adapter-work");
    let home = doc.query_selector("a[href=\"#adapter-home\"]").unwrap().unwrap();
    let work = doc.query_selector("a[href=\"#adapter-work\"]").unwrap().unwrap();
    assert!(!home.class_list().contains("active"));
    assert!(work.class_list().contains("active"));

    nodes.set_menu_open(true);
    assert!(toggle.class_list().contains("active"));
    assert!(menu.class_list().contains("active"));
    nodes.set_menu_open(false);
    assert!(!menu.class_list().contains("active"));
}

#[wasm_bindgen_test]
async fn toaster_shows_then_removes_notification() {
    let doc = document();
    let body = doc.body().unwrap();
    let mut toaster = Toaster {
        window: web_sys::window().unwrap(),
        document: doc,
        body: body.clone(),
        timings: ToastTimings {
            enter_ms: 0,
            visible_ms: 20,
            exit_ms: 20,
        },
    };
    toaster.notify(&Notification::error("Please fill in all fields"));

    let toast: HtmlElement = body.last_element_child().unwrap().unchecked_into();
    assert_eq!(toast.text_content().as_deref(), Some("Please fill in all fields"));
    assert!(toast.class_list().contains("notification--error"));

    sleep(120).await;
    assert!(!toast.is_connected());
}

#[wasm_bindgen_test]
async fn frame_loop_stops_when_step_declines() {
    let frames = Rc::new(Cell::new(0u32));
    let seen = frames.clone();
    dom::frame_loop(move |_| {
        seen.set(seen.get() + 1);
        seen.get() < 3
    });
    sleep(300).await;
    assert_eq!(frames.get(), 3);
}
