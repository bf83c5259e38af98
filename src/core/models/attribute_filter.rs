use std::fmt;

/// Keys accepted by the CloudTrail `LookupEvents` attribute filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    EventId,
    EventName,
    ReadOnly,
    Username,
    ResourceName,
    ResourceType,
    EventSource,
    AccessKeyId,
}

impl AttributeKey {
    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::EventId => "EventId",
            AttributeKey::EventName => "EventName",
            AttributeKey::ReadOnly => "ReadOnly",
            AttributeKey::Username => "Username",
            AttributeKey::ResourceName => "ResourceName",
            AttributeKey::ResourceType => "ResourceType",
            AttributeKey::EventSource => "EventSource",
            AttributeKey::AccessKeyId => "AccessKeyId",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One server-side search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    pub key: AttributeKey,
    pub value: String,
}

impl AttributeFilter {
    pub fn new(key: AttributeKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}
