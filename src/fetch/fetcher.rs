//! Windowed replay-id enumeration.

use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use url::Url;

use crate::auth::ApiKey;
use crate::error::BallchasingError;
use crate::fetch::sink::IdSink;
use crate::fetch::window::{
    DEFAULT_RESOLUTION, TimeWindow, format_minute_utc, normalize_resolution, windows,
};
use crate::rate_limit::EndpointFamily;
use crate::rest::{ReplayApiClient, ReplayList};

/// Hard cap on the number of results the provider returns for one query.
///
/// A `count` above this, or a `count` that disagrees with the number of
/// items actually returned, means the window silently truncated.
pub const MAX_RESULTS_PER_QUERY: u64 = 9999;

/// Planned-call count above which an advisory is logged.
const WINDOW_COUNT_ADVISORY: usize = 100;

/// Parameters for a windowed replay-id fetch.
#[derive(Debug, Clone)]
pub struct FetchParams {
    /// Full `/replays` query URL including any non-time filters
    pub base_query: String,
    /// Start of the date range (inclusive)
    pub start: OffsetDateTime,
    /// End of the date range (exclusive)
    pub end: OffsetDateTime,
    /// Sub-window size; defaults to one day, floor of one minute
    pub resolution: Option<Duration>,
}

impl FetchParams {
    /// Fetch parameters with the default one-day resolution.
    pub fn new(
        base_query: impl Into<String>,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Self {
        Self {
            base_query: base_query.into(),
            start,
            end,
            resolution: None,
        }
    }

    /// Override the sub-window resolution.
    pub fn with_resolution(mut self, resolution: Duration) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Validate the parameters and return the normalized resolution.
    ///
    /// Runs before any network activity.
    fn validated(&self) -> Result<Duration, BallchasingError> {
        Url::parse(&self.base_query).map_err(|e| {
            BallchasingError::Validation(format!("base query is not a valid URL: {e}"))
        })?;
        match EndpointFamily::from_url(&self.base_query)? {
            EndpointFamily::ReplayList => {},
            family => {
                return Err(BallchasingError::Configuration(format!(
                    "base query must target the /replays list endpoint, not {family}"
                )));
            },
        }
        if self.start >= self.end {
            return Err(BallchasingError::Validation(
                "start time must precede end time".to_string(),
            ));
        }
        normalize_resolution(self.resolution.unwrap_or(DEFAULT_RESOLUTION))
    }
}

/// Enumerate the replay ids matching `params` through an established client.
///
/// The range is split into sub-windows at the validated resolution, the
/// batch-wide rate-limit delay is computed once, and each window is queried
/// in order. A window whose result is truncated or over the hard cap aborts
/// the whole fetch with [`BallchasingError::ResponseOverflow`]; the caller
/// should retry at a finer resolution. Ids already flushed to the sink are
/// left in place on abort.
///
/// The returned ids are in window order, never re-ordered or de-duplicated.
pub async fn fetch_replay_ids(
    client: &mut ReplayApiClient,
    params: &FetchParams,
    mut sink: Option<&mut dyn IdSink>,
) -> Result<Vec<String>, BallchasingError> {
    let resolution = params.validated()?;
    let planned: Vec<TimeWindow> = windows(params.start, params.end, resolution).collect();

    if planned.len() <= WINDOW_COUNT_ADVISORY {
        info!(calls = planned.len(), "planned API calls");
    } else {
        warn!(
            calls = planned.len(),
            "planned API calls - consider using a coarser resolution"
        );
    }

    // One decision for the whole batch; the loop below runs at a constant rate.
    let delay = client.delay_for(EndpointFamily::ReplayList, planned.len());

    let mut all_ids = Vec::new();
    for window in &planned {
        let after = format_minute_utc(window.start)?;
        let before = format_minute_utc(window.end)?;
        let url = window_query(&params.base_query, &after, &before);

        let data: ReplayList = client.call(&url, delay).await?;

        let mut window_ids = Vec::new();
        if !data.is_empty() {
            if data.count > MAX_RESULTS_PER_QUERY || data.list.len() as u64 != data.count {
                return Err(BallchasingError::ResponseOverflow(format!(
                    "window {after} to {before} returned {} of {} replays, \
                     a finer resolution is required",
                    data.list.len(),
                    data.count
                )));
            }
            window_ids.extend(data.list.into_iter().map(|replay| replay.id));
        }

        info!(
            count = window_ids.len(),
            %after,
            %before,
            "stored replay ids for window"
        );

        if let Some(sink) = sink.as_deref_mut() {
            sink.flush(&window_ids)?;
        }
        all_ids.append(&mut window_ids);
    }

    Ok(all_ids)
}

/// Establish a session for `api_key` and run a windowed fetch with it.
///
/// Parameters are validated before the identity probe, so malformed input
/// never touches the network.
pub async fn fetch_replay_ids_with_key(
    api_key: ApiKey,
    params: &FetchParams,
    sink: Option<&mut dyn IdSink>,
) -> Result<Vec<String>, BallchasingError> {
    params.validated()?;
    let mut client = ReplayApiClient::establish(api_key).await?;
    fetch_replay_ids(&mut client, params, sink).await
}

/// Append the time-bounded filter to a base query with the right separator.
fn window_query(base_query: &str, after: &str, before: &str) -> String {
    let mut url = String::from(base_query);
    if !(url.ends_with('?') || url.ends_with('&')) {
        url.push(if url.contains('?') { '&' } else { '?' });
    }
    url.push_str(&format!("created-after={after}&created-before={before}"));
    url
}
