use chrono::{DateTime, Utc};

/// Tri-state `ReadOnly` lookup filter.
///
/// `Unspecified` means no `ReadOnly` attribute is sent at all, which is
/// different from explicitly asking for write events (`False`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadOnlyFilter {
    #[default]
    Unspecified,
    True,
    False,
}

impl ReadOnlyFilter {
    /// The literal attribute value, or `None` when the filter is unset.
    pub fn as_attribute_value(&self) -> Option<&'static str> {
        match self {
            ReadOnlyFilter::Unspecified => None,
            ReadOnlyFilter::True => Some("true"),
            ReadOnlyFilter::False => Some("false"),
        }
    }
}

impl From<Option<bool>> for ReadOnlyFilter {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => ReadOnlyFilter::Unspecified,
            Some(true) => ReadOnlyFilter::True,
            Some(false) => ReadOnlyFilter::False,
        }
    }
}

/// Search criteria supplied by the user for one lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_id: Option<String>,
    pub event_name: Option<String>,
    pub user_name: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
    pub event_source: Option<String>,
    pub access_key_id: Option<String>,
    pub read_only: ReadOnlyFilter,
    /// Signed so that out-of-range input reaches validation intact.
    pub max_results: i64,
    pub error_only: bool,
    pub truncate_user_name: bool,
    pub truncate_user_agent: bool,
}

/// Concrete, validated lookup window (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
