//! Utility modules supporting provider calls.
//!
//! - [`HttpClient`]: reqwest client bound to a provider's timeout, with the
//!   single-attempt send/classify/decode step every adapter shares
//! - [`endpoint_url`]: resolve an API path against a configured base URL

mod http;

pub use http::{endpoint_url, HttpClient};
