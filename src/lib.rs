//! # ballchasing API Client
//!
//! An async Rust client for the [ballchasing.com](https://ballchasing.com)
//! replay-hosting API, built for enumerating replay ids over arbitrary date
//! ranges without violating the provider's request quotas.
//!
//! ## Features
//!
//! - Tier-aware rate limiting over the dual per-second/per-hour schedule
//! - Bounded retry with exponential backoff on transient 429/500 failures
//! - Windowed pagination that detects silently truncated result sets
//! - Incremental persistence of discovered ids through append-only sinks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ballchasing_api_client::fetch::{fetch_replay_ids_with_key, FetchParams};
//! use time::macros::datetime;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = "my-api-key".into();
//!     let params = FetchParams::new(
//!         "https://ballchasing.com/api/replays?playlist=ranked-duels",
//!         datetime!(2021-03-01 00:00 UTC),
//!         datetime!(2021-03-04 00:00 UTC),
//!     );
//!     let ids = fetch_replay_ids_with_key(api_key, &params, None).await?;
//!     println!("found {} replays", ids.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod fetch;
pub mod rate_limit;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::BallchasingError;
pub use types::Tier;

/// Result type alias using BallchasingError
pub type Result<T> = std::result::Result<T, BallchasingError>;
