//! `cronbeats ping|start|end|success|fail <key>`.

use super::print_result;
use anyhow::Result;
use cronbeats_core::PingClient;

pub fn run_ping(client: &PingClient) -> Result<()> {
    print_result(&client.ping()?)
}

pub fn run_start(client: &PingClient) -> Result<()> {
    print_result(&client.start()?)
}

pub fn run_end(client: &PingClient, status: &str) -> Result<()> {
    print_result(&client.end(status)?)
}

pub fn run_success(client: &PingClient) -> Result<()> {
    print_result(&client.success()?)
}

pub fn run_fail(client: &PingClient) -> Result<()> {
    print_result(&client.fail()?)
}
