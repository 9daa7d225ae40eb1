//! `cronbeats progress <key> [--seq N] [--message TEXT]`.

use super::print_result;
use anyhow::Result;
use cronbeats_core::{PingClient, ProgressArgs};

/// A lone `--seq` is sent as a bare sequence number.
pub(crate) fn progress_args(seq: Option<i64>, message: Option<String>) -> ProgressArgs {
    match (seq, message) {
        (None, None) => ProgressArgs::NoArgs,
        (Some(seq), None) => ProgressArgs::SeqOnly(seq),
        (seq, message) => ProgressArgs::Options { seq, message },
    }
}

pub fn run_progress(client: &PingClient, seq: Option<i64>, message: Option<String>) -> Result<()> {
    print_result(&client.progress(progress_args(seq, message))?)
}
