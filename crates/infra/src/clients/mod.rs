//! HTTP clients for the three collaborator backends.

pub mod analytics;
pub mod backend;
pub mod dispatch;

pub use analytics::HttpAnalyticsClient;
pub use backend::HttpBackendClient;
pub use dispatch::HttpDispatchClient;
