//! `launchtrack-infra`
//!
//! **Responsibility:** Concrete collaborator clients and process
//! configuration.
//!
//! HTTP implementations of the seams defined in `launchtrack-analytics` and
//! `launchtrack-followup`: the entity-management backend, the analytics/AI
//! backend, and the message dispatch service. Nothing here retries: the
//! orchestrating components own retry policy (always user-triggered).

pub mod clients;
pub mod config;
pub mod dto;
pub mod http;

pub use clients::{HttpAnalyticsClient, HttpBackendClient, HttpDispatchClient};
pub use config::{AppConfig, ConfigError};
pub use http::ApiClient;
