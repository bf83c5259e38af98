use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::adapters::cloudtrail::cloudtrail_pages::CloudTrailPages;
use crate::cli::{LookupArgs, output, table};
use crate::config::app_config::{AppConfig, DefaultsSection};
use crate::core::errors::Result;
use crate::core::models::deadline::Deadline;
use crate::core::models::filter_request::FilterRequest;
use crate::core::services::lookup_service::LookupService;

/// Budget for fetching and processing all pages.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Result cap when neither a flag nor the config file sets one.
pub const DEFAULT_MAX_RESULTS: i64 = 20;

/// Execute the default command: look up events and print them as a table.
///
/// Everything that can be checked locally is checked before credentials
/// are loaded. Nothing is printed unless every page was fetched.
pub fn execute(args: &LookupArgs, config_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let request = build_request(args, &config.defaults);

    let service = LookupService;
    let plan = service.plan(&request, Utc::now())?;

    let deadline = Deadline::after(OPERATION_TIMEOUT);
    let mut source = CloudTrailPages::connect(
        request.profile.as_deref(),
        request.region.as_deref(),
        &plan,
        deadline,
    )?;
    let rows = service.run(&plan, &mut source, &deadline)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    table::render(&rows, &mut out)?;
    out.flush()?;

    if rows.is_empty() {
        output::warning("No events matched. Try widening --start-time or removing filters.");
    }

    Ok(())
}

/// Merge flags over config defaults into a request.
fn build_request(args: &LookupArgs, defaults: &DefaultsSection) -> FilterRequest {
    FilterRequest {
        profile: args.profile.clone().or_else(|| defaults.profile.clone()),
        region: args.region.clone().or_else(|| defaults.region.clone()),
        start_time: args.start_time,
        end_time: args.end_time,
        event_id: args.event_id.clone(),
        event_name: args.event_name.clone(),
        user_name: args.user_name.clone(),
        resource_name: args.resource_name.clone(),
        resource_type: args.resource_type.clone(),
        event_source: args.event_source.clone(),
        access_key_id: args.access_key_id.clone(),
        read_only: args.read_only.into(),
        max_results: args
            .max_results
            .or(defaults.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS),
        error_only: args.error_only,
        truncate_user_name: args.truncate_user_name
            || defaults.truncate_user_name.unwrap_or(false),
        truncate_user_agent: args.truncate_user_agent
            || defaults.truncate_user_agent.unwrap_or(false),
    }
}
