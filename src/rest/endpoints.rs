//! ballchasing REST API endpoint constants.

/// Base URL for the ballchasing REST API.
pub const BALLCHASING_BASE_URL: &str = "https://ballchasing.com/api";

/// Identity probe, reports the Patreon tier for an API key.
pub const PING: &str = "/";

/// Bulk replay queries (append a `/` and an id for a single lookup).
pub const REPLAYS: &str = "/replays";
