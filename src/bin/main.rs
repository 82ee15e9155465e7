// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: main.rs
// Author: hashgen maintainers

use colored::Colorize;
use hashgen::hgen::app;
use tracing_subscriber::EnvFilter;

fn main() {
	let filter = EnvFilter::try_from_env("HGEN_LOG")
		.unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = app::run() {
		eprintln!("{} {}", "error:".red().bold(), err);
		std::process::exit(2);
	}
}
