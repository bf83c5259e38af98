pub mod commands;
pub mod output;
pub mod table;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};

/// Fast single purpose CLI for CloudTrail log filtering.
#[derive(Parser, Debug)]
#[command(name = "cloudtrail-cli", about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to alternative config file
    #[arg(long, global = true, env = "CLOUDTRAIL_CLI_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version number
    #[command(visible_alias = "v")]
    Version,
}

/// Filters and display switches for the event lookup.
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// AWS shared config profile
    #[arg(short, long)]
    pub profile: Option<String>,

    /// AWS region
    #[arg(short, long)]
    pub region: Option<String>,

    /// Timestamp in 2023-01-01T00:00:00 format (UTC) or RFC 3339
    #[arg(short, long, value_parser = parse_timestamp)]
    pub start_time: Option<DateTime<Utc>>,

    /// Timestamp in 2023-01-01T00:00:00 format (UTC) or RFC 3339
    #[arg(short, long, value_parser = parse_timestamp)]
    pub end_time: Option<DateTime<Utc>>,

    /// Filter events with event id
    #[arg(long)]
    pub event_id: Option<String>,

    /// Filter events with event name
    #[arg(long)]
    pub event_name: Option<String>,

    /// Filter events with user name
    #[arg(long)]
    pub user_name: Option<String>,

    /// Filter events with resource name
    #[arg(long)]
    pub resource_name: Option<String>,

    /// Filter events with resource type
    #[arg(long)]
    pub resource_type: Option<String>,

    /// Filter events with event source (e.g. s3.amazonaws.com)
    #[arg(long)]
    pub event_source: Option<String>,

    /// Filter events with access key id
    #[arg(long)]
    pub access_key_id: Option<String>,

    /// Filter events with ReadOnly=true, or ReadOnly=false with --read-only=false
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub read_only: Option<bool>,

    /// Maximum number of events to display [default: 20]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub max_results: Option<i64>,

    /// Only show events with errors
    #[arg(long)]
    pub error_only: bool,

    /// Truncate user names to 24 bytes
    #[arg(long)]
    pub truncate_user_name: bool,

    /// Truncate user agents to 24 bytes
    #[arg(long)]
    pub truncate_user_agent: bool,
}

/// Layout used when no offset is given; the value is read as UTC.
const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse `YYYY-MM-DDTHH:MM:SS` (UTC) or an RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_LAYOUT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            format!("invalid timestamp '{s}': expected 2023-01-01T00:00:00 (UTC) or RFC 3339")
        })
}
