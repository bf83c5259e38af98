use crate::core::errors::Result;
use crate::core::models::activity_event::RawEvent;

/// Port for a paginated source of raw CloudTrail events.
///
/// The production implementation talks to the `LookupEvents` API; tests
/// substitute an in-memory sequence of pages.
pub trait EventPages {
    /// Whether another page can be requested.
    fn has_more_pages(&self) -> bool;

    /// Fetch the next page, in arrival order.
    fn next_page(&mut self) -> Result<Vec<RawEvent>>;
}
