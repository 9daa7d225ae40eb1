//! CLI command handlers.

mod heartbeat;
mod progress;

pub use heartbeat::{run_end, run_fail, run_ping, run_start, run_success};
pub use progress::run_progress;
#[cfg(test)]
pub(crate) use progress::progress_args;

use anyhow::Result;
use cronbeats_core::PingResult;

/// Print the normalized result as pretty JSON on stdout.
fn print_result(result: &PingResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
