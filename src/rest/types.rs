//! Wire types for the ballchasing REST API.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::types::Tier;

/// Body of the identity endpoint (`GET /api/`).
#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    /// Patreon tier associated with the API key
    #[serde(rename = "type")]
    pub tier: Tier,
    /// Display name of the account
    #[serde(default)]
    pub name: Option<String>,
    /// Steam id of the account
    #[serde(default)]
    pub steam_id: Option<String>,
    /// Whether the account is a chaser
    #[serde(default)]
    pub chaser: Option<bool>,
}

/// Body of a bulk replay query (`GET /api/replays?...`).
///
/// `count` is the provider's total for the query, which may silently
/// disagree with `list.len()` when the result set was truncated - callers
/// must treat such a mismatch as an overflow.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayList {
    /// Total number of replays the provider matched
    #[serde(default)]
    pub count: u64,
    /// The replays actually returned
    #[serde(default)]
    pub list: Vec<ReplaySummary>,
}

impl ReplayList {
    /// Whether this response explicitly matched nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.list.is_empty()
    }
}

/// One replay entry in a bulk query response.
///
/// Only the id is load-bearing for enumeration; the remaining fields are a
/// small useful subset of the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaySummary {
    /// Opaque replay identifier
    pub id: String,
    /// Title the uploader gave the replay
    #[serde(default)]
    pub replay_title: Option<String>,
    /// Playlist the match was played in
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// When the replay was uploaded
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
}
