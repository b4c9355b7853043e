//! Editable list input for Leptos.
//!
//! The list always ends in an empty row for the next entry. Empty entries
//! are dropped when focus leaves a row, and keyboard focus follows the row
//! the user was on. The DOM-free core ([`controller`], [`reconcile`],
//! [`filter`], [`focus`], [`scheduler`]) is usable and testable on its own;
//! [`components`] binds it to Leptos signals.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod filter;
pub mod focus;
pub mod models;
pub mod reconcile;
pub mod scheduler;

pub use components::hooks::use_list_input::{use_list_input, SignalBinding, UseListInput};
pub use components::ui::{
    provide_row_templates, use_row_template, ListInput, RemoveItemButton, RowContext,
    RowTemplate, RowTemplateRegistry,
};
pub use config::{
    provide_list_input_config, use_list_input_config, ConfigError, ConfigKey, ListInputConfig,
};
pub use controller::{ListInputBuilder, ListInputController};
pub use filter::{filter_significant, Filtered};
pub use focus::dom::DomFocus;
pub use focus::FocusQuery;
pub use reconcile::ListBinding;
pub use scheduler::{Scheduler, TimeoutScheduler};

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;


// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(app::App);
}
