//! Atelier - scene authoring toolkit
//!
//! The root crate ties the workspace together for a UI host:
//! - [`config`] - Layered configuration (TOML files and `ATL_` env vars)
//! - [`service`] - The [`AuthoringService`] façade over scene and editor state

pub mod config;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use service::AuthoringService;
