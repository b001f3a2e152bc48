//! Portfolio FX core crate.
//!
//! Interactive behaviour for a single static portfolio page, compiled to WASM.
//! Each visual effect is a small state machine in its own module, driven through
//! a presentation trait so it runs (and is tested) without a browser. `dom`
//! implements those traits over `web_sys`; `app` wires them to page events.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod contact;
pub mod counter;
pub mod cursor;
pub mod error;
pub mod loading;
pub mod logging;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod theme;
pub mod typing;

mod app;
pub mod dom;

pub use config::FxConfig;
pub use error::{FxError, ValidationError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Boots every effect with the default tuning.
#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    app::start(FxConfig::default()).map_err(JsValue::from)
}

/// Boots with a JSON tuning override, e.g. `{"particle_count": 20}`.
#[wasm_bindgen]
pub fn start_portfolio_with_config(json: &str) -> Result<(), JsValue> {
    let config = FxConfig::from_json(json).map_err(FxError::from)?;
    app::start(config).map_err(JsValue::from)
}

/// Close button of the success modal.
#[wasm_bindgen]
pub fn close_modal() {
    app::close_modal();
}
