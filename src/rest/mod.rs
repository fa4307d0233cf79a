//! REST client for the ballchasing API.

mod client;
mod endpoints;
mod types;

pub use client::{MAX_CONSECUTIVE_FAILURES, ReplayApiClient, ReplayApiClientBuilder};
pub use endpoints::BALLCHASING_BASE_URL;
pub use types::{PingResponse, ReplayList, ReplaySummary};
