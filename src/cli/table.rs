use std::io::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::core::errors::Result;
use crate::core::models::activity_event::DisplayRow;

#[derive(Tabled)]
struct TableRow<'a> {
    #[tabled(rename = "EventId")]
    event_id: &'a str,
    #[tabled(rename = "EventName")]
    event_name: &'a str,
    #[tabled(rename = "EventTime")]
    event_time: &'a str,
    #[tabled(rename = "Username")]
    user_name: &'a str,
    #[tabled(rename = "EventSource")]
    event_source: &'a str,
    #[tabled(rename = "UserAgent")]
    user_agent: &'a str,
    #[tabled(rename = "SourceIPAddress")]
    source_ip_address: &'a str,
    #[tabled(rename = "AccessKeyId")]
    access_key_id: &'a str,
    #[tabled(rename = "ErrorCode")]
    error_code: &'a str,
    #[tabled(rename = "ReadOnly")]
    read_only: bool,
}

impl<'a> From<&'a DisplayRow> for TableRow<'a> {
    fn from(row: &'a DisplayRow) -> Self {
        Self {
            event_id: &row.event_id,
            event_name: &row.event_name,
            event_time: &row.event_time,
            user_name: &row.user_name,
            event_source: &row.event_source,
            user_agent: &row.user_agent,
            source_ip_address: &row.source_ip_address,
            access_key_id: &row.access_key_id,
            error_code: &row.error_code,
            read_only: row.read_only,
        }
    }
}

/// Render rows, in the order given, as one table with a fixed header.
pub fn render<W: Write>(rows: &[DisplayRow], out: &mut W) -> Result<()> {
    let mut table = Table::new(rows.iter().map(TableRow::from));
    table.with(Style::modern());
    writeln!(out, "{table}")?;
    Ok(())
}
