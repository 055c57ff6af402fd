// Library root
// -----------
// The binary (`main.rs`) wires these modules into an interactive terminal
// client for the product catalog API.
//
// Module responsibilities:
// - `api`: HTTP calls against the `/produtos` collection, behind the
//   `ProductApi` trait.
// - `client`: the catalog view-model. Owns the view state, handles
//   `Command`s and reports to a `View`.
// - `state`, `model`, `debounce`: plain data and the search timer.
// - `config`: command-line, environment and file configuration.
// - `ui`: terminal adapter implementing `View` and the menu loop.
pub mod api;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod model;
pub mod state;
pub mod ui;
