//! Static rate-limit schedule by endpoint family and Patreon tier.

use std::time::Duration;

use crate::error::BallchasingError;
use crate::types::Tier;

/// Seconds in the hourly rate-limit window.
const HOUR_SECS: f64 = 3600.0;

/// The two rate-limited endpoint families of the ballchasing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFamily {
    /// Bulk replay queries (`/replays?...`)
    ReplayList,
    /// Single replay lookups (`/replays/{id}`)
    ReplayDetail,
}

impl EndpointFamily {
    /// Classify a request URL into an endpoint family.
    ///
    /// The detail prefix is checked first: a detail URL contains both
    /// substrings, a list URL only the shorter one. URLs that target
    /// neither family are a configuration error.
    pub fn from_url(url: &str) -> Result<Self, BallchasingError> {
        if url.contains("/replays/") {
            Ok(EndpointFamily::ReplayDetail)
        } else if url.contains("/replays") {
            Ok(EndpointFamily::ReplayList)
        } else {
            Err(BallchasingError::Configuration(format!(
                "{url} does not target a supported endpoint (only /replays and /replays/{{id}} are supported)"
            )))
        }
    }
}

impl std::fmt::Display for EndpointFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointFamily::ReplayList => write!(f, "/replays"),
            EndpointFamily::ReplayDetail => write!(f, "/replays/{{id}}"),
        }
    }
}

/// A schedule entry: either a single fixed inter-call delay, or a pair of
/// delays with the per-hour regime taking over once a batch is large enough
/// to exhaust the hourly budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLimit {
    /// One delay in seconds, regardless of batch size
    Fixed(f64),
    /// Dual-window entry, delays in seconds
    Dual {
        /// Delay satisfying the per-second burst limit
        per_second: f64,
        /// Delay spreading a batch across the hourly cap
        per_hour: f64,
    },
}

/// Look up the schedule entry for an endpoint family and tier.
pub const fn schedule(family: EndpointFamily, tier: Tier) -> RateLimit {
    match family {
        EndpointFamily::ReplayList => match tier {
            Tier::Regular => RateLimit::Dual {
                per_second: 0.625,
                per_hour: 9.000,
            },
            Tier::Gold => RateLimit::Dual {
                per_second: 0.625,
                per_hour: 4.500,
            },
            Tier::Diamond => RateLimit::Dual {
                per_second: 0.313,
                per_hour: 2.250,
            },
            Tier::Champion => RateLimit::Fixed(0.156),
            Tier::GrandChampion => RateLimit::Fixed(0.078),
        },
        EndpointFamily::ReplayDetail => match tier {
            Tier::Regular => RateLimit::Dual {
                per_second: 0.625,
                per_hour: 4.500,
            },
            Tier::Gold => RateLimit::Dual {
                per_second: 0.625,
                per_hour: 2.250,
            },
            Tier::Diamond => RateLimit::Dual {
                per_second: 0.313,
                per_hour: 0.900,
            },
            Tier::Champion => RateLimit::Fixed(0.156),
            Tier::GrandChampion => RateLimit::Fixed(0.078),
        },
    }
}

/// Compute the inter-call delay for a batch of `planned_calls` requests.
///
/// The decision is made once for the whole batch and assumes the batch runs
/// at a constant rate: a batch that finishes before the hourly budget is
/// exhausted at the per-second rate keeps the per-second delay, any larger
/// batch runs at the per-hour delay from its first call. A batch sitting
/// exactly on the boundary resolves to the per-hour regime.
pub fn delay_for(family: EndpointFamily, tier: Tier, planned_calls: usize) -> Duration {
    let seconds = match schedule(family, tier) {
        RateLimit::Fixed(seconds) => seconds,
        RateLimit::Dual {
            per_second,
            per_hour,
        } => {
            if (planned_calls as f64) < HOUR_SECS / per_hour {
                per_second
            } else {
                per_hour
            }
        },
    };
    Duration::from_secs_f64(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tiers_ignore_batch_size() {
        for tier in [Tier::Champion, Tier::GrandChampion] {
            let single = delay_for(EndpointFamily::ReplayList, tier, 1);
            let huge = delay_for(EndpointFamily::ReplayList, tier, 1_000_000);
            assert_eq!(single, huge);
        }
        assert_eq!(
            delay_for(EndpointFamily::ReplayDetail, Tier::GrandChampion, 99),
            Duration::from_secs_f64(0.078)
        );
    }

    #[test]
    fn test_dual_regime_selection() {
        // Regular /replays: hourly budget is 3600 / 9.0 = 400 calls.
        assert_eq!(
            delay_for(EndpointFamily::ReplayList, Tier::Regular, 399),
            Duration::from_secs_f64(0.625)
        );
        assert_eq!(
            delay_for(EndpointFamily::ReplayList, Tier::Regular, 401),
            Duration::from_secs_f64(9.0)
        );
    }

    #[test]
    fn test_boundary_resolves_to_per_hour() {
        // Exactly 400 planned calls would overrun the hour at the fast rate.
        assert_eq!(
            delay_for(EndpointFamily::ReplayList, Tier::Regular, 400),
            Duration::from_secs_f64(9.0)
        );
        // Diamond /replays/{id}: boundary at 3600 / 0.9 = 4000.
        assert_eq!(
            delay_for(EndpointFamily::ReplayDetail, Tier::Diamond, 4000),
            Duration::from_secs_f64(0.9)
        );
        assert_eq!(
            delay_for(EndpointFamily::ReplayDetail, Tier::Diamond, 3999),
            Duration::from_secs_f64(0.313)
        );
    }

    #[test]
    fn test_family_classification() {
        assert_eq!(
            EndpointFamily::from_url("https://ballchasing.com/api/replays?playlist=ranked-duels")
                .unwrap(),
            EndpointFamily::ReplayList
        );
        assert_eq!(
            EndpointFamily::from_url("https://ballchasing.com/api/replays/1d1c6040").unwrap(),
            EndpointFamily::ReplayDetail
        );
    }

    #[test]
    fn test_unsupported_url_is_configuration_error() {
        let err = EndpointFamily::from_url("https://ballchasing.com/api/maps").unwrap_err();
        assert!(matches!(err, BallchasingError::Configuration(_)));
    }
}
