use crate::core::errors::Result;
use crate::core::models::build_info::{self, BUILD_TIME, GIT_VERSION, NAME, RUSTC_VERSION};

/// Execute the `cloudtrail-cli version` command.
pub fn execute() -> Result<()> {
    println!("{NAME} {}", build_info::display_version());
    println!(" Git Commit: {}", GIT_VERSION.unwrap_or("unknown"));
    println!(" Build with: {}", RUSTC_VERSION.unwrap_or("unknown"));
    println!(" Build time: {}", BUILD_TIME.unwrap_or("unknown"));
    Ok(())
}
