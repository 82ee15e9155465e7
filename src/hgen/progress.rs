// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: progress.rs
// Author: hashgen maintainers

//! Throttled stderr progress for long file digests, fed from the
//! engine's chunk callback.

use crate::hgen::engine::ChunkProgress;
use clap::ValueEnum;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProgressMode {
	Auto,
	Always,
	Never,
}

#[derive(Clone, Copy, Debug)]
pub struct ProgressConfig {
	pub mode: ProgressMode,
	pub throttle: Duration,
}

impl Default for ProgressConfig {
	fn default() -> Self {
		Self {
			mode: ProgressMode::Auto,
			throttle: Duration::from_millis(250),
		}
	}
}

impl ProgressConfig {
	pub fn should_emit(&self, quiet: bool, is_tty: bool) -> bool {
		match self.mode {
			ProgressMode::Never => false,
			ProgressMode::Always => !quiet,
			ProgressMode::Auto => !quiet && is_tty,
		}
	}

	pub fn should_emit_on_stderr(&self, quiet: bool) -> bool {
		self.should_emit(quiet, io::stderr().is_terminal())
	}
}

pub struct ProgressEmitter<W: Write = io::Stderr> {
	config: ProgressConfig,
	out: W,
	last_emit: Option<Instant>,
	emitted_bytes: Option<u64>,
	bytes: u64,
	total: Option<u64>,
	start: Instant,
}

impl ProgressEmitter<io::Stderr> {
	pub fn new(config: ProgressConfig) -> Self {
		Self::with_writer(config, io::stderr())
	}
}

impl<W: Write> ProgressEmitter<W> {
	pub fn with_writer(config: ProgressConfig, out: W) -> Self {
		Self {
			config,
			out,
			last_emit: None,
			emitted_bytes: None,
			bytes: 0,
			total: None,
			start: Instant::now(),
		}
	}

	pub fn announce(&mut self, label: &str) {
		let _ = writeln!(self.out, "hashing {}...", label);
	}

	/// Chunk callback; never asks the engine to stop.
	pub fn record(&mut self, progress: &ChunkProgress) -> bool {
		self.bytes = progress.bytes_processed;
		self.total = progress.total_bytes;
		let due = self
			.last_emit
			.map_or(true, |at| at.elapsed() >= self.config.throttle);
		if due {
			self.emit_message();
		}
		true
	}

	/// Prints the closing line unless it would repeat the last one.
	pub fn emit_final(&mut self) {
		if self.emitted_bytes != Some(self.bytes) {
			self.emit_message();
		}
	}

	fn emit_message(&mut self) {
		self.last_emit = Some(Instant::now());
		self.emitted_bytes = Some(self.bytes);
		let elapsed = self.start.elapsed().as_secs_f64().max(0.001);
		let throughput = (self.bytes as f64) / elapsed / 1024.0;
		let message = match self.total {
			Some(total) if total > 0 => format!(
				"{} / {} bytes ({:.0}%, {:.1} KiB/s)",
				self.bytes,
				total,
				self.bytes as f64 * 100.0 / total as f64,
				throughput,
			),
			_ => format!("{} bytes ({:.1} KiB/s)", self.bytes, throughput),
		};
		let _ = writeln!(self.out, "{}", message);
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}
