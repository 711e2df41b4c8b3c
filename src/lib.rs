//! Library desk
//!
//! Client for a library management service: catalog maintenance
//! (list, create, edit) and an advanced boolean search with book
//! reservation, driven over the service's JSON HTTP API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};

/// Application state shared by the command handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
