//! CLI for sending CronBeats heartbeats.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cronbeats_core::config::{self, ClientConfig};
use cronbeats_core::PingClient;
use std::path::PathBuf;

use commands::{run_end, run_fail, run_ping, run_progress, run_start, run_success};

/// Top-level CLI for the CronBeats heartbeat client.
#[derive(Debug, Parser)]
#[command(name = "cronbeats")]
#[command(about = "Send job heartbeats to CronBeats", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/cronbeats/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the service base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the number of retries after the first attempt.
    #[arg(long, global = true, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Override the per-attempt timeout in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send a plain heartbeat.
    Ping {
        /// 8-character job key.
        key: String,
    },

    /// Report that a job run has started.
    Start {
        /// 8-character job key.
        key: String,
    },

    /// Report that a job run has ended.
    End {
        /// 8-character job key.
        key: String,
        /// "success" or "fail".
        #[arg(default_value = "success")]
        status: String,
    },

    /// Shorthand for `end <KEY> success`.
    Success {
        /// 8-character job key.
        key: String,
    },

    /// Shorthand for `end <KEY> fail`.
    Fail {
        /// 8-character job key.
        key: String,
    },

    /// Report progress of a running job.
    Progress {
        /// 8-character job key.
        key: String,
        /// Progress sequence number (non-negative).
        #[arg(long, allow_negative_numbers = true, value_name = "N")]
        seq: Option<i64>,
        /// Progress message (truncated to 255 characters).
        #[arg(long, value_name = "TEXT")]
        message: Option<String>,
    },
}

impl CliCommand {
    fn key(&self) -> &str {
        match self {
            CliCommand::Ping { key }
            | CliCommand::Start { key }
            | CliCommand::End { key, .. }
            | CliCommand::Success { key }
            | CliCommand::Fail { key }
            | CliCommand::Progress { key, .. } => key,
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let client = PingClient::new(cli.command.key(), cfg)?;

        match cli.command {
            CliCommand::Ping { .. } => run_ping(&client)?,
            CliCommand::Start { .. } => run_start(&client)?,
            CliCommand::End { status, .. } => run_end(&client, &status)?,
            CliCommand::Success { .. } => run_success(&client)?,
            CliCommand::Fail { .. } => run_fail(&client)?,
            CliCommand::Progress { seq, message, .. } => run_progress(&client, seq, message)?,
        }

        Ok(())
    }
}

impl Cli {
    /// Config file (explicit or XDG default) with command-line overrides applied.
    fn load_config(&self) -> Result<ClientConfig> {
        let base = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        let cfg = self.apply_overrides(base);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_overrides(&self, mut cfg: ClientConfig) -> ClientConfig {
        if let Some(base_url) = &self.base_url {
            cfg.base_url = base_url.clone();
        }
        if let Some(max_retries) = self.max_retries {
            cfg.max_retries = max_retries;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            cfg.timeout_ms = timeout_ms;
        }
        cfg
    }
}

#[cfg(test)]
mod tests;
