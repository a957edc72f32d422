//! JSON HTTP surface over [`Lookup`](crate::lookup::Lookup).

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
