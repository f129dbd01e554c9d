//! Blog backend (axum + PostgreSQL) and the client that talks to it.

pub mod app;
pub mod auth;
pub mod blogs;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod users;
