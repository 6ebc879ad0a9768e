// Library root — exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod db;
pub mod directory;
pub mod dispatcher;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod store;

// These modules are only needed by the binary.
pub mod cli;
pub mod config;
pub mod logging;
