//! StudySphere collaboration server.
//!
//! Rooms where users share a live text document, a bounded chat history and a
//! drawing canvas over WebSocket, plus a small HTTP API for accounts and
//! durable room records.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod app;
pub mod config;
