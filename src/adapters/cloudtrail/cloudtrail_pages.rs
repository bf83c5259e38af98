use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudtrail::error::DisplayErrorContext;
use aws_sdk_cloudtrail::primitives::DateTime;
use aws_sdk_cloudtrail::types::{LookupAttribute, LookupAttributeKey};
use tokio::runtime::Runtime;

use crate::core::errors::{Result, TrailError};
use crate::core::models::activity_event::RawEvent;
use crate::core::models::attribute_filter::{AttributeFilter, AttributeKey};
use crate::core::models::deadline::Deadline;
use crate::core::services::lookup_service::LookupPlan;
use crate::core::traits::event_pages::EventPages;

/// Paginated `LookupEvents` calls against the CloudTrail API.
///
/// The SDK is async; each page is driven to completion on a private
/// current-thread runtime, bounded by what is left of the deadline.
pub struct CloudTrailPages {
    runtime: Runtime,
    client: aws_sdk_cloudtrail::Client,
    start_time: DateTime,
    end_time: DateTime,
    attributes: Vec<LookupAttribute>,
    page_size: i32,
    next_token: Option<String>,
    exhausted: bool,
    deadline: Deadline,
}

impl CloudTrailPages {
    /// Load credentials for `profile`/`region` and prepare the lookup.
    pub fn connect(
        profile: Option<&str>,
        region: Option<&str>,
        plan: &LookupPlan,
        deadline: Deadline,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TrailError::RemoteFetchFailed {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        let attributes = plan
            .filters
            .iter()
            .map(to_sdk_attribute)
            .collect::<Result<Vec<_>>>()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }

        let remaining = deadline.remaining()?;
        let config = runtime
            .block_on(async { tokio::time::timeout(remaining, loader.load()).await })
            .map_err(|_| deadline.timeout_error())?;

        tracing::debug!(
            profile = profile.unwrap_or("default"),
            region = ?config.region(),
            "loaded AWS configuration"
        );

        Ok(Self {
            runtime,
            client: aws_sdk_cloudtrail::Client::new(&config),
            start_time: DateTime::from_millis(plan.window.start.timestamp_millis()),
            end_time: DateTime::from_millis(plan.window.end.timestamp_millis()),
            attributes,
            page_size: plan.page_size,
            next_token: None,
            exhausted: false,
            deadline,
        })
    }
}

impl EventPages for CloudTrailPages {
    fn has_more_pages(&self) -> bool {
        !self.exhausted
    }

    fn next_page(&mut self) -> Result<Vec<RawEvent>> {
        let remaining = self.deadline.remaining()?;

        let request = self
            .client
            .lookup_events()
            .start_time(self.start_time)
            .end_time(self.end_time)
            .set_lookup_attributes((!self.attributes.is_empty()).then(|| self.attributes.clone()))
            .max_results(self.page_size)
            .set_next_token(self.next_token.clone());

        let output = self
            .runtime
            .block_on(async { tokio::time::timeout(remaining, request.send()).await })
            .map_err(|_| self.deadline.timeout_error())?
            .map_err(|e| {
                tracing::debug!(error = %DisplayErrorContext(&e), "LookupEvents failed");
                TrailError::RemoteFetchFailed {
                    reason: e.to_string(),
                }
            })?;

        self.next_token = output.next_token().map(str::to_string);
        self.exhausted = self.next_token.is_none();

        Ok(output
            .events()
            .iter()
            .map(|event| {
                event
                    .cloud_trail_event()
                    .map(RawEvent::new)
                    .unwrap_or_default()
            })
            .collect())
    }
}

fn to_sdk_key(key: AttributeKey) -> LookupAttributeKey {
    match key {
        AttributeKey::EventId => LookupAttributeKey::EventId,
        AttributeKey::EventName => LookupAttributeKey::EventName,
        AttributeKey::ReadOnly => LookupAttributeKey::ReadOnly,
        AttributeKey::Username => LookupAttributeKey::Username,
        AttributeKey::ResourceName => LookupAttributeKey::ResourceName,
        AttributeKey::ResourceType => LookupAttributeKey::ResourceType,
        AttributeKey::EventSource => LookupAttributeKey::EventSource,
        AttributeKey::AccessKeyId => LookupAttributeKey::AccessKeyId,
    }
}

fn to_sdk_attribute(filter: &AttributeFilter) -> Result<LookupAttribute> {
    LookupAttribute::builder()
        .attribute_key(to_sdk_key(filter.key))
        .attribute_value(&filter.value)
        .build()
        .map_err(|e| TrailError::InvalidArgument {
            detail: format!("cannot build {} filter: {e}", filter.key),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_maps_to_its_sdk_name() {
        for key in [
            AttributeKey::EventId,
            AttributeKey::EventName,
            AttributeKey::ReadOnly,
            AttributeKey::Username,
            AttributeKey::ResourceName,
            AttributeKey::ResourceType,
            AttributeKey::EventSource,
            AttributeKey::AccessKeyId,
        ] {
            assert_eq!(to_sdk_key(key).as_str(), key.as_str());
        }
    }

    #[test]
    fn builds_sdk_attribute() {
        let filter = AttributeFilter::new(AttributeKey::EventName, "ConsoleLogin");
        let attribute = to_sdk_attribute(&filter).unwrap();
        assert_eq!(attribute.attribute_key(), &LookupAttributeKey::EventName);
        assert_eq!(attribute.attribute_value(), "ConsoleLogin");
    }
}
