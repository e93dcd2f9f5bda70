//! Async client for the Twilight mood journal API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), twilight::ApiError> {
//! use std::sync::Arc;
//! use twilight::{ApiClient, MockTransport, Twilight};
//!
//! let twilight = Twilight::new(ApiClient::new(Arc::new(MockTransport::new())));
//! let streak = twilight.statistics().current_streak().await?;
//! println!("{} days", streak.current);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod mock;
pub mod token;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::Twilight;
pub use client::{ApiClient, ApiClientBuilder, RequestOptions};
pub use config::Config;
pub use error::ApiError;
pub use http::{FilePart, ReqwestTransport, RetryPolicy, Transport, TransportError};
pub use mock::MockTransport;
pub use token::TokenStore;
