//! # Book Search
//!
//! Book search over three external catalogue APIs, each with its own
//! authentication scheme: Aladin, Kakao and Naver.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Typed requests and native responses per provider, and the
//!   [`CallOutcome`](models::CallOutcome) of a call
//! - [`providers`]: One adapter per provider behind the [`BookProvider`] trait
//! - [`facade`]: Routes requests to adapters and fans keywords out to all of them
//! - [`api`]: HTTP entry point (axum)
//! - [`utils`]: HTTP client shared by the adapters
//! - [`config`]: Configuration management

pub mod api;
pub mod config;
pub mod facade;
pub mod models;
pub mod providers;
pub mod utils;

// Re-export commonly used types
pub use facade::BooksFacade;
pub use models::{CallOutcome, ProviderFailure, SearchRequest, SearchResult};
pub use providers::BookProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
