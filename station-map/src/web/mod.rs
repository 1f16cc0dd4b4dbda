//! Web layer for the station map.
//!
//! Serves the map page and JSON endpoints over the classified feeds.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
