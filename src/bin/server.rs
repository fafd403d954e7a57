//! `RoastBot` API server.
//! Run with: cargo run --bin roastbot-server

use std::process::ExitCode;

use roastbot::start_roastbot;

fn main() -> ExitCode {
    start_roastbot::run()
}
