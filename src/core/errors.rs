/// All domain errors for cloudtrail-cli.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum TrailError {
    #[error(
        "Invalid argument: {detail}\n\n  \
         Run 'cloudtrail-cli --help' to see accepted flags and formats."
    )]
    InvalidArgument { detail: String },

    #[error("Malformed event skipped: {reason}")]
    MalformedEvent { reason: String },

    #[error(
        "Unable to retrieve CloudTrail events: {reason}\n\n  \
         Solutions:\n    \
         → Check your credentials: aws sts get-caller-identity --profile <profile>\n    \
         → Make sure the identity is allowed to call cloudtrail:LookupEvents\n    \
         → Pass the trail's region explicitly: --region <region>"
    )]
    RemoteFetchFailed { reason: String },

    #[error(
        "Operation timed out after {seconds} seconds\n\n  \
         No events were displayed. Narrow the time range or lower\n  \
         --max-results and try again."
    )]
    OperationTimeout { seconds: u64 },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrailError>;
