//! HTTP API: configuration, routing, principal resolution and error mapping.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
