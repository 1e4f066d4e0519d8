pub mod config;
pub mod logging;

pub mod detail;
pub mod download;
pub mod failover;
pub mod fetcher;
pub mod http;
pub mod local_store;
pub mod media;
pub mod proxy;
pub mod query;
pub mod render;
pub mod saved;
pub mod session;
pub mod surface;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;
