//! The `strata` command line tool. It loads a fixture of versioned records
//! into an in-memory store, and runs a batch of SELECT statements against it.

#[macro_use]
extern crate tracing;

mod cli;
mod cnf;
mod err;
mod telemetry;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
	cli::init().await
}
