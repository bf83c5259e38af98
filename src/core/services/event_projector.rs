use std::borrow::Cow;

use crate::core::errors::{Result, TrailError};
use crate::core::models::activity_event::{
    ActivityEvent, DisplayRow, IdentityKind, RawEvent, UserIdentity,
};
use crate::core::models::filter_request::FilterRequest;

/// Largest event payload accepted for parsing (1 MiB).
pub const MAX_EVENT_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Width, in bytes, that truncated columns are cut to.
pub const TRUNCATE_LENGTH: usize = 24;

/// Placeholder for identities without a readable name.
pub const UNKNOWN_USER: &str = "-";

/// Display switches taken from the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub error_only: bool,
    pub truncate_user_name: bool,
    pub truncate_user_agent: bool,
}

impl From<&FilterRequest> for ProjectionOptions {
    fn from(request: &FilterRequest) -> Self {
        Self {
            error_only: request.error_only,
            truncate_user_name: request.truncate_user_name,
            truncate_user_agent: request.truncate_user_agent,
        }
    }
}

/// Parse one raw payload, bounded by [`MAX_EVENT_PAYLOAD_BYTES`].
pub fn parse_event(raw: &RawEvent) -> Result<ActivityEvent> {
    let payload = raw.payload.as_deref().ok_or_else(|| TrailError::MalformedEvent {
        reason: "event data is missing".into(),
    })?;

    if payload.len() > MAX_EVENT_PAYLOAD_BYTES {
        return Err(TrailError::MalformedEvent {
            reason: format!(
                "payload of {} bytes exceeds the {MAX_EVENT_PAYLOAD_BYTES} byte limit",
                payload.len()
            ),
        });
    }

    serde_json::from_str(payload).map_err(|e| TrailError::MalformedEvent {
        reason: format!("invalid event JSON: {e}"),
    })
}

/// Readable actor name for the `Username` column.
pub fn display_user_name(identity: &UserIdentity) -> &str {
    match &identity.kind {
        IdentityKind::IamUser { user_name } | IdentityKind::WebIdentityUser { user_name } => {
            user_name.as_str()
        }
        // arn:aws:sts::<account>:assumed-role/<role>/<session>
        IdentityKind::AssumedRole { arn } => arn.split('/').nth(2).unwrap_or(arn.as_str()),
        IdentityKind::Root | IdentityKind::Other(_) => UNKNOWN_USER,
    }
}

/// Cut `input` to `max_len` bytes without splitting a character.
///
/// When no character boundary exists in `1..=max_len` the raw byte cut is
/// used, with the broken sequence rendered as U+FFFD. Only in that case
/// can the result be longer than `max_len` (up to 3 bytes), which needs a
/// `max_len` below 4.
pub fn truncate(truncate: bool, input: &str, max_len: usize) -> Cow<'_, str> {
    if !truncate || input.len() <= max_len {
        return Cow::Borrowed(input);
    }

    match (1..=max_len).rev().find(|&i| input.is_char_boundary(i)) {
        Some(cut) => Cow::Borrowed(&input[..cut]),
        None => String::from_utf8_lossy(&input.as_bytes()[..max_len]),
    }
}

/// Reduce a parsed event to a table row, or `None` when filtered out.
pub fn to_row(event: ActivityEvent, options: &ProjectionOptions) -> Option<DisplayRow> {
    if options.error_only && event.error_code.is_empty() {
        return None;
    }

    let identity = &event.user_identity;
    tracing::debug!(
        event_id = %event.event_id,
        request_id = %event.request_id,
        event_version = %event.event_version,
        aws_region = %event.aws_region,
        recipient_account_id = %event.recipient_account_id,
        event_category = %event.event_category,
        management_event = event.management_event,
        identity_type = %identity.kind.tag(),
        principal_id = %identity.principal_id,
        account_id = %identity.account_id,
        invoked_by = %identity.invoked_by,
        "projecting event"
    );
    if !event.error_code.is_empty() {
        tracing::debug!(
            event_id = %event.event_id,
            error_code = %event.error_code,
            error_message = %event.error_message,
            "event recorded an error"
        );
    }

    let user_name = truncate(
        options.truncate_user_name,
        display_user_name(&event.user_identity),
        TRUNCATE_LENGTH,
    )
    .into_owned();
    let user_agent =
        truncate(options.truncate_user_agent, &event.user_agent, TRUNCATE_LENGTH).into_owned();

    Some(DisplayRow {
        event_id: event.event_id,
        event_name: event.event_name,
        event_time: event.event_time,
        user_name,
        event_source: event.event_source,
        user_agent,
        source_ip_address: event.source_ip_address,
        access_key_id: event.user_identity.access_key_id,
        error_code: event.error_code,
        read_only: event.read_only,
    })
}

/// Project a batch in arrival order.
///
/// Events that are missing, oversized or unparsable are logged and
/// skipped; they never abort the batch.
pub fn project_events(events: Vec<RawEvent>, options: &ProjectionOptions) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(events.len());

    for (index, raw) in events.iter().enumerate() {
        let event = match parse_event(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(index, "{e}");
                continue;
            }
        };

        if let Some(row) = to_row(event, options) {
            rows.push(row);
        }
    }

    rows
}
