//! Snapshot of the host's network connections, served as JSON.
//!
//! The [`collector`] lists sockets once through `netstat` (or `ss`), the
//! result is frozen into a [`store::SnapshotStore`] and [`server`] exposes it
//! on `GET /`.

pub mod collector;
pub mod config;
pub mod record;
pub mod server;
pub mod store;
