//! blogdesk: terminal client for the educational blog backend.
//!
//! The remote origin owns every post; this crate only lists, searches,
//! creates, edits and deletes them over HTTP and renders the screens.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod models;
pub mod navigation;
pub mod tui;
