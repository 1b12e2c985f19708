//! Tauri command handlers, one module per screen.
//!
//! Commands return `Result<T, String>` at the IPC boundary; typed errors are
//! stringified with their display form so the frontend can show them as-is.

pub mod auth;
pub mod dashboard;
pub mod gallery;
pub mod orders;
pub mod products;
pub mod recap;
