use serde::{Deserialize, Deserializer};

/// One event exactly as returned by a `LookupEvents` page.
///
/// The payload is the `CloudTrailEvent` JSON document, which the API may
/// omit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub payload: Option<String>,
}

impl RawEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

/// Parsed CloudTrail record.
///
/// References:
/// - https://docs.aws.amazon.com/awscloudtrail/latest/userguide/cloudtrail-event-reference-record-contents.html
/// - https://docs.aws.amazon.com/awscloudtrail/latest/userguide/cloudtrail-event-reference-user-identity.html
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_identity: UserIdentity,
    /// Provider-native timestamp, kept verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_region: String,
    #[serde(rename = "sourceIPAddress", default, deserialize_with = "null_as_default")]
    pub source_ip_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_agent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_message: String,
    #[serde(rename = "requestID", default, deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(rename = "eventID", default, deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_only: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub management_event: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipient_account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_category: String,
}

/// Who made the call, keyed by the record's `type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKind {
    IamUser { user_name: String },
    WebIdentityUser { user_name: String },
    AssumedRole { arn: String },
    Root,
    /// Any tag without a dedicated display rule (`AWSService`, `AWSAccount`, ...).
    Other(String),
}

impl IdentityKind {
    /// The record's `type` tag.
    pub fn tag(&self) -> &str {
        match self {
            IdentityKind::IamUser { .. } => "IAMUser",
            IdentityKind::WebIdentityUser { .. } => "WebIdentityUser",
            IdentityKind::AssumedRole { .. } => "AssumedRole",
            IdentityKind::Root => "Root",
            IdentityKind::Other(tag) => tag,
        }
    }
}

impl Default for IdentityKind {
    fn default() -> Self {
        IdentityKind::Other(String::new())
    }
}

/// The `userIdentity` element of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawUserIdentity")]
pub struct UserIdentity {
    pub kind: IdentityKind,
    pub principal_id: String,
    pub account_id: String,
    pub access_key_id: String,
    pub invoked_by: String,
}

/// Flat wire shape of `userIdentity`; every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserIdentity {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    principal_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    access_key_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    invoked_by: String,
}

impl From<RawUserIdentity> for UserIdentity {
    fn from(raw: RawUserIdentity) -> Self {
        let kind = match raw.kind.as_str() {
            "IAMUser" => IdentityKind::IamUser {
                user_name: raw.user_name,
            },
            "WebIdentityUser" => IdentityKind::WebIdentityUser {
                user_name: raw.user_name,
            },
            "AssumedRole" => IdentityKind::AssumedRole { arn: raw.arn },
            "Root" => IdentityKind::Root,
            _ => IdentityKind::Other(raw.kind),
        };

        Self {
            kind,
            principal_id: raw.principal_id,
            account_id: raw.account_id,
            access_key_id: raw.access_key_id,
            invoked_by: raw.invoked_by,
        }
    }
}

/// Reads JSON `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One output line, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub event_id: String,
    pub event_name: String,
    pub event_time: String,
    pub user_name: String,
    pub event_source: String,
    pub user_agent: String,
    pub source_ip_address: String,
    pub access_key_id: String,
    pub error_code: String,
    pub read_only: bool,
}
