//! Windowed enumeration of replay ids over arbitrary date ranges.
//!
//! The `/replays` endpoint returns at most 9999 results per query and may
//! silently truncate beyond that, so an arbitrary date range is partitioned
//! into sub-windows small enough that no single query overflows. Each window
//! is queried through the rate-limited client, its results are checked for
//! truncation, and the discovered ids are accumulated in window order and
//! optionally mirrored to an append-only sink after every window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ballchasing_api_client::fetch::{fetch_replay_ids, FetchParams};
//! use ballchasing_api_client::rest::ReplayApiClient;
//! use time::macros::datetime;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ReplayApiClient::establish("my-api-key".into()).await?;
//!     let params = FetchParams::new(
//!         "https://ballchasing.com/api/replays?playlist=ranked-doubles",
//!         datetime!(2021-03-01 00:00 UTC),
//!         datetime!(2021-03-08 00:00 UTC),
//!     );
//!     let ids = fetch_replay_ids(&mut client, &params, None).await?;
//!     println!("{} replays", ids.len());
//!     Ok(())
//! }
//! ```

mod fetcher;
mod sink;
mod window;

pub use fetcher::{
    FetchParams, MAX_RESULTS_PER_QUERY, fetch_replay_ids, fetch_replay_ids_with_key,
};
pub use sink::{CsvSink, IdSink};
pub use window::TimeWindow;
