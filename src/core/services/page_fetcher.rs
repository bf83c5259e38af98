use crate::core::errors::Result;
use crate::core::models::activity_event::RawEvent;
use crate::core::traits::event_pages::EventPages;

/// Largest page `LookupEvents` will return.
pub const MAX_PAGE_SIZE: usize = 50;

/// Page size to request for a given result cap.
pub fn page_size(max_results: usize) -> i32 {
    max_results.clamp(1, MAX_PAGE_SIZE) as i32
}

/// Drain pages until the source is exhausted or `max_results` events
/// have arrived, then cut the surplus from the last page.
///
/// Any page failure aborts the whole fetch; nothing gathered so far is
/// returned.
pub fn fetch_events<P: EventPages>(source: &mut P, max_results: usize) -> Result<Vec<RawEvent>> {
    let mut events = Vec::new();
    let mut pages = 0usize;

    while source.has_more_pages() {
        let page = source.next_page()?;
        pages += 1;
        tracing::debug!(page = pages, events = page.len(), "fetched page");
        events.extend(page);
        if events.len() >= max_results {
            break;
        }
    }

    events.truncate(max_results);
    tracing::debug!(pages, events = events.len(), "fetch complete");
    Ok(events)
}
