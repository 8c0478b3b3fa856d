//! # recon-client
//!
//! Resilient REST client for the Books API.
//!
//! Every call goes through the same pipeline:
//! 1. obtain a bearer token (cached, refreshed ahead of expiry)
//! 2. wait for the shared throttle slot
//! 3. send through a [`Transport`]
//! 4. classify the response: success, rate limited, token expired, rejected
//! 5. back off linearly and retry, or refresh the token and retry once
//!
//! The [`Transport`] trait is the test seam: integration tests script
//! responses without a network and run under paused tokio time.

mod client;
mod error;
mod retry;
mod signal;
mod throttle;
mod token;
mod transport;

pub use client::{ApiClient, ClientSettings};
pub use error::ClientError;
pub use reqwest::Method;
pub use retry::BackoffPolicy;
pub use signal::{Signal, SignalCodes};
pub use throttle::Throttle;
pub use token::TokenManager;
pub use transport::{ApiRequest, ApiResponse, RefreshGrant, ReqwestTransport, TokenGrant, Transport};
