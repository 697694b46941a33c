//! Fleet Admin
//!
//! Role-based administrative console for the fleet management backend:
//! users, vehicles, orders, quote forms, expenses and financial and
//! performance reports.
//!
//! # Architecture
//!
//! - **Session**: the backend-issued token, persisted between runs and decoded
//!   for its role and expiry
//! - **Router**: static route table with a typed access policy per view, and a
//!   navigation guard that resolves every transition before it happens
//! - **Client**: thin typed wrappers over the backend REST API
//!
//! # Modules
//!
//! - [`security`]: token claims and session storage
//! - [`router`]: route table, navigation guard, redirect resolution
//! - [`client`]: HTTP client with per-resource APIs
//! - [`types`]: request and response bodies
//! - [`app`]: console shell tying router and client together

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod router;
pub mod security;
pub mod types;

pub use app::{App, Page};
pub use client::Client;
pub use error::{Error, Result};
pub use router::{Access, Navigation, NavigationGuard, Route, RouteTable, Router, View};
pub use security::{Session, SessionStore};
