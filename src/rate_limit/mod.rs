//! Rate limiting for the ballchasing API.
//!
//! ballchasing.com enforces a dual-window rate limit on every endpoint: a
//! per-second burst limit and, for the lower Patreon tiers, a per-hour cap.
//! Rather than a token bucket, this crate complies by sleeping a fixed
//! computed delay after every call. The delay is decided once for a whole
//! planned batch: if the batch would finish before the hourly budget runs out
//! at the faster per-second rate, the per-second delay is used, otherwise the
//! batch runs at the slower per-hour rate from the start.
//!
//! The schedule values carry a 25% safety margin over the minimum interval
//! each published limit requires.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use ballchasing_api_client::rate_limit::{delay_for, EndpointFamily};
//! use ballchasing_api_client::types::Tier;
//!
//! // 50 list calls on a regular account fit inside the hourly budget.
//! let delay = delay_for(EndpointFamily::ReplayList, Tier::Regular, 50);
//! assert_eq!(delay, Duration::from_secs_f64(0.625));
//!
//! // 5000 calls do not, so the batch runs at the hourly rate.
//! let delay = delay_for(EndpointFamily::ReplayList, Tier::Regular, 5000);
//! assert_eq!(delay, Duration::from_secs_f64(9.0));
//! ```

mod schedule;

pub use schedule::{delay_for, EndpointFamily, RateLimit, schedule};
