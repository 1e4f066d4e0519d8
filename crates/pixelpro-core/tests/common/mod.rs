//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod recording_surface;
pub mod stub_server;
