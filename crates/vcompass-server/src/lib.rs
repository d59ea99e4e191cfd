//! Library surface for the V-Compass server, shared by the binary and tests.

pub mod api;
pub mod config;
pub mod state;
