//! Screening HTTP adapter: routes, handlers, DTOs.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ScreeningAppState;
pub use routes::routes as screening_routes;
