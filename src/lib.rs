//! `retry-http` is a shared outbound HTTP client for services.
//!
//! One [`RetryingClient`] owns one connection pool with a fixed connect
//! timeout and per-attempt deadline. Every call goes through a bounded
//! retry loop that retries transport failures immediately:
//! - [`RetryingClient::get`]
//! - [`RetryingClient::post_form`]
//! - [`RetryingClient::post_body`] / [`RetryingClient::post_reader`]
//!
//! Failures are reported through `tracing`; install a subscriber in the
//! binary to see them.

mod client;
mod error;
mod form;
mod options;

pub use client::RetryingClient;
pub use error::HttpClientError;
pub use form::Form;
pub use options::ClientOptions;

pub type Result<T> = std::result::Result<T, HttpClientError>;
