//! Time-window decomposition of a fetch range.

use time::{Duration, OffsetDateTime, UtcOffset};
use time::macros::format_description;
use tracing::warn;

use crate::error::BallchasingError;

/// Default sub-window size when the caller does not specify one.
pub(crate) const DEFAULT_RESOLUTION: Duration = Duration::days(1);

/// The API's practical floor for a sub-window.
const MIN_RESOLUTION: Duration = Duration::minutes(1);

/// One half-open sub-window `[start, end)` of the overall fetch range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive lower bound
    pub start: OffsetDateTime,
    /// Exclusive upper bound, clamped to the overall range end
    pub end: OffsetDateTime,
}

/// Round a caller-supplied resolution to the nearest whole minute.
///
/// A resolution that rounds to zero is clamped to one minute with a warning;
/// a non-positive resolution is rejected outright.
pub(crate) fn normalize_resolution(resolution: Duration) -> Result<Duration, BallchasingError> {
    if resolution <= Duration::ZERO {
        return Err(BallchasingError::Validation(
            "time resolution must be positive".to_string(),
        ));
    }
    let minutes = (resolution.as_seconds_f64() / 60.0).round() as i64;
    if minutes == 0 {
        warn!("time resolution too high, clamped to 1 minute (max resolution)");
        return Ok(MIN_RESOLUTION);
    }
    Ok(Duration::minutes(minutes))
}

/// Lazily generate the sub-windows covering `[start, end)`.
///
/// Windows are produced by repeated addition of `resolution` to `start`; the
/// final window's end is clamped to `end` rather than overshooting. Bounds
/// are contiguous and non-overlapping.
pub(crate) fn windows(
    start: OffsetDateTime,
    end: OffsetDateTime,
    resolution: Duration,
) -> WindowIter {
    WindowIter {
        next_start: start,
        range_end: end,
        resolution,
    }
}

/// Iterator returned by [`windows`].
#[derive(Debug, Clone)]
pub(crate) struct WindowIter {
    next_start: OffsetDateTime,
    range_end: OffsetDateTime,
    resolution: Duration,
}

impl Iterator for WindowIter {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        if self.next_start >= self.range_end {
            return None;
        }
        let start = self.next_start;
        self.next_start = start + self.resolution;
        Some(TimeWindow {
            start,
            end: self.next_start.min(self.range_end),
        })
    }
}

/// Format a timestamp the way the time-bounded filters expect: UTC, minute
/// precision, seconds forced to zero.
pub(crate) fn format_minute_utc(timestamp: OffsetDateTime) -> Result<String, BallchasingError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:00Z");
    Ok(timestamp.to_offset(UtcOffset::UTC).format(&format)?)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_three_days_at_one_day_resolution() {
        let start = datetime!(2021-03-01 00:00 UTC);
        let end = start + Duration::days(3);
        let all: Vec<TimeWindow> = windows(start, end, Duration::days(1)).collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].start, start);
        assert_eq!(all[2].end, end);
        for pair in all.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_final_window_clamped() {
        let start = datetime!(2021-03-01 00:00 UTC);
        let end = start + Duration::hours(60);
        let all: Vec<TimeWindow> = windows(start, end, Duration::days(1)).collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all[2].start, start + Duration::days(2));
        assert_eq!(all[2].end, end);
        assert_eq!(all[2].end - all[2].start, Duration::hours(12));
    }

    #[test]
    fn test_resolution_rounds_to_nearest_minute() {
        assert_eq!(
            normalize_resolution(Duration::seconds(90)).unwrap(),
            Duration::minutes(2)
        );
        assert_eq!(
            normalize_resolution(Duration::days(1) + Duration::seconds(20)).unwrap(),
            Duration::days(1)
        );
    }

    #[test]
    fn test_sub_minute_resolution_promoted_to_one_minute() {
        assert_eq!(
            normalize_resolution(Duration::seconds(25)).unwrap(),
            Duration::minutes(1)
        );
    }

    #[test]
    fn test_non_positive_resolution_rejected() {
        assert!(matches!(
            normalize_resolution(Duration::seconds(-5)),
            Err(BallchasingError::Validation(_))
        ));
        assert!(matches!(
            normalize_resolution(Duration::ZERO),
            Err(BallchasingError::Validation(_))
        ));
    }

    #[test]
    fn test_minute_utc_format_truncates_seconds() {
        let timestamp = datetime!(2021-03-01 18:04:59 UTC);
        assert_eq!(
            format_minute_utc(timestamp).unwrap(),
            "2021-03-01T18:04:00Z"
        );

        // Offsets are converted to UTC before formatting.
        let offset = datetime!(2021-03-01 18:04 +02:00);
        assert_eq!(format_minute_utc(offset).unwrap(), "2021-03-01T16:04:00Z");
    }
}
