//! lin - terminal client for the Linear issues assigned to you
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod data;
pub mod integrations;
pub mod table;
pub mod text;
pub mod tui;
pub mod util;
