//! HTTP adapters - REST API implementations.

pub mod screening;

pub use screening::{screening_routes, ScreeningAppState};
