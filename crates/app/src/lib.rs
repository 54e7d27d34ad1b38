//! `launchtrack-app`
//!
//! **Responsibility:** Session wiring.
//!
//! `DashboardSession` composes the three owning components (snapshot
//! fetcher, prioritization selector, follow-up controller) for one login
//! session. The `launchtrack-monitor` binary runs a headless refresh loop on
//! top of it.

pub mod session;

pub use session::{DashboardSession, SessionError};
