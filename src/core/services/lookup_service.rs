use chrono::{DateTime, Utc};

use crate::core::errors::Result;
use crate::core::models::activity_event::DisplayRow;
use crate::core::models::attribute_filter::AttributeFilter;
use crate::core::models::deadline::Deadline;
use crate::core::models::filter_request::{FilterRequest, TimeWindow};
use crate::core::services::event_projector::{self, ProjectionOptions};
use crate::core::services::filter_composer::FilterComposer;
use crate::core::services::page_fetcher;
use crate::core::services::validator;
use crate::core::traits::event_pages::EventPages;

/// Everything needed to issue the lookup, computed before any network call.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupPlan {
    pub window: TimeWindow,
    pub filters: Vec<AttributeFilter>,
    pub max_results: usize,
    pub page_size: i32,
    pub projection: ProjectionOptions,
}

/// Runs one lookup: validate, compose, fetch, project.
pub struct LookupService;

impl LookupService {
    /// Validate the request, default its window relative to `now`, and
    /// compose its attribute filters.
    pub fn plan(&self, request: &FilterRequest, now: DateTime<Utc>) -> Result<LookupPlan> {
        let window = validator::validate(request, now)?;
        let filters = FilterComposer.compose(request);
        // validated to 1..=MAX_RESULTS_LIMIT
        let max_results = request.max_results as usize;

        tracing::debug!(
            start = %window.start.to_rfc3339(),
            end = %window.end.to_rfc3339(),
            filters = filters.len(),
            max_results,
            "lookup planned"
        );

        Ok(LookupPlan {
            window,
            filters,
            max_results,
            page_size: page_fetcher::page_size(max_results),
            projection: ProjectionOptions::from(request),
        })
    }

    /// Fetch and project all rows for `plan` from `source`.
    ///
    /// Fails as a whole if any page fails or the deadline passes; rows are
    /// only returned once every step succeeded.
    pub fn run<P: EventPages>(
        &self,
        plan: &LookupPlan,
        source: &mut P,
        deadline: &Deadline,
    ) -> Result<Vec<DisplayRow>> {
        let events = page_fetcher::fetch_events(source, plan.max_results)?;
        let rows = event_projector::project_events(events, &plan.projection);
        deadline.remaining()?;
        Ok(rows)
    }
}
