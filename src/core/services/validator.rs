use chrono::{DateTime, Duration, Utc};

use crate::core::errors::{Result, TrailError};
use crate::core::models::filter_request::{FilterRequest, TimeWindow};

/// Upper bound CloudTrail accepts for a single lookup.
pub const MAX_RESULTS_LIMIT: i64 = 50_000;

/// Span of the window used when no start time is given.
pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;

/// Reject result caps outside `1..=MAX_RESULTS_LIMIT`.
pub fn validate_max_results(max_results: i64) -> Result<()> {
    if max_results <= 0 {
        return Err(TrailError::InvalidArgument {
            detail: format!(
                "cannot pass --max-results with a value lower or equal to 0 (got {max_results})"
            ),
        });
    }
    if max_results > MAX_RESULTS_LIMIT {
        return Err(TrailError::InvalidArgument {
            detail: format!("--max-results cannot exceed {MAX_RESULTS_LIMIT} (got {max_results})"),
        });
    }
    Ok(())
}

/// Fill in missing bounds and check their order.
///
/// A missing end defaults to `now`; a missing start defaults to the end
/// minus [`DEFAULT_LOOKBACK_HOURS`].
pub fn resolve_time_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<TimeWindow> {
    let end = end.unwrap_or(now);
    let start = start.unwrap_or(end - Duration::hours(DEFAULT_LOOKBACK_HOURS));

    if start > end {
        return Err(TrailError::InvalidArgument {
            detail: format!(
                "start time cannot be after end time ({} > {})",
                start.to_rfc3339(),
                end.to_rfc3339()
            ),
        });
    }

    Ok(TimeWindow { start, end })
}

/// Validate the request and derive its concrete lookup window.
///
/// The cap is checked before any defaulting happens.
pub fn validate(request: &FilterRequest, now: DateTime<Utc>) -> Result<TimeWindow> {
    validate_max_results(request.max_results)?;
    resolve_time_window(request.start_time, request.end_time, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn accepts_caps_in_range() {
        for cap in [1, 20, 50, 49_999, MAX_RESULTS_LIMIT] {
            assert!(validate_max_results(cap).is_ok(), "cap {cap} should pass");
        }
    }

    #[test]
    fn rejects_caps_out_of_range() {
        for cap in [i64::MIN, -1, 0, MAX_RESULTS_LIMIT + 1, i64::MAX] {
            let err = validate_max_results(cap).unwrap_err();
            assert!(
                matches!(err, TrailError::InvalidArgument { .. }),
                "cap {cap} should fail"
            );
        }
    }

    #[test]
    fn missing_end_defaults_to_now() {
        let now = at(12);
        let window = resolve_time_window(None, None, now).unwrap();
        assert_eq!(window.end, now);
    }

    #[test]
    fn missing_start_defaults_to_one_day_before_end() {
        let end = at(12);
        let window = resolve_time_window(None, Some(end), at(23)).unwrap();
        assert_eq!(window.end, end);
        assert_eq!(window.start, end - Duration::hours(24));
    }

    #[test]
    fn explicit_bounds_are_kept() {
        let window = resolve_time_window(Some(at(1)), Some(at(2)), at(23)).unwrap();
        assert_eq!(window, TimeWindow { start: at(1), end: at(2) });
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(resolve_time_window(Some(at(5)), Some(at(5)), at(23)).is_ok());
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = resolve_time_window(Some(at(3)), Some(at(2)), at(23)).unwrap_err();
        assert!(matches!(err, TrailError::InvalidArgument { .. }));
    }

    #[test]
    fn start_after_defaulted_end_is_rejected() {
        let now = at(10);
        let err = resolve_time_window(Some(at(11)), None, now).unwrap_err();
        assert!(matches!(err, TrailError::InvalidArgument { .. }));
    }

    #[test]
    fn cap_is_checked_before_time_order() {
        let request = FilterRequest {
            max_results: 0,
            start_time: Some(at(3)),
            end_time: Some(at(2)),
            ..Default::default()
        };
        let err = validate(&request, at(23)).unwrap_err();
        assert!(err.to_string().contains("--max-results"));
    }

    #[test]
    fn default_window_uses_call_time() {
        let request = FilterRequest {
            max_results: 20,
            ..Default::default()
        };
        let before = Utc::now();
        let window = validate(&request, Utc::now()).unwrap();
        let after = Utc::now();
        assert!(window.end >= before && window.end <= after);
        assert_eq!(window.end - window.start, Duration::hours(24));
    }
}
