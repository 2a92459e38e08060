//! # eduverse-api
//!
//! HTTP API layer for Eduverse built on Axum.
//!
//! Provides all REST endpoints, the WebSocket upgrade, extractors, DTOs,
//! and error mapping. State wiring lives in [`app`]; the server binary
//! calls [`app::build_state`] and [`router::build_router`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::build_state;
pub use router::build_router;
pub use state::AppState;
