//! `jobnexus-api` — the HTTP surface of the job board.
//!
//! Layout:
//! - `config.rs`: env-driven runtime configuration
//! - `bootstrap.rs`: idempotent startup seeding (the superadmin)
//! - `middleware.rs`: bearer-token authentication and identity resolution
//! - `app/`: router assembly, services, routes, DTOs, error mapping

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod middleware;
