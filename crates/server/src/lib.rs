//! HTTP surface for the carbon context service.
//!
//! `POST /api/chat` drives the question-answering pipeline; `GET
//! /api/dashboard` serves the unified dashboard view-model; `GET /healthz`
//! is a liveness probe. An optional debug route exposes the loaded context's
//! top-level shape.

pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
