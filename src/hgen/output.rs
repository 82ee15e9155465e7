// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// Module: output
// Purpose: Rendering of digest results for the CLI formats.

use crate::hgen::digest::Digest;
use crate::hgen::verify::Verification;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use strum::EnumIter;

/// Output formats surfaced via the CLI `--output` flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, EnumIter)]
pub enum OutputFormat {
	Hex,
	Base64,
	Json,
}

impl OutputFormat {
	pub fn canonical_name(self) -> &'static str {
		match self {
			Self::Hex => "hex",
			Self::Base64 => "base64",
			Self::Json => "json",
		}
	}

	fn encode(self, digest: &Digest) -> String {
		match self {
			Self::Base64 => digest.to_base64(),
			Self::Hex | Self::Json => digest.to_hex(),
		}
	}
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Hex => "hexadecimal",
			Self::Base64 => "base64",
			Self::Json => "JSON",
		};
		write!(f, "{}", label)
	}
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestSource {
	Text,
	File,
}

/// Everything the CLI knows about one digest run.
#[derive(Clone, Debug, Serialize)]
pub struct DigestReport {
	pub algorithm: &'static str,
	pub source: DigestSource,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	pub iterations: u64,
	pub digest: Digest,
	pub digest_base64: String,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub chain: Vec<Digest>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub verification: Option<Verification>,
}

impl DigestReport {
	pub fn new(
		source: DigestSource,
		path: Option<String>,
		digest: Digest,
		iterations: u64,
	) -> Self {
		Self {
			algorithm: digest.algorithm(),
			source,
			path,
			iterations,
			digest_base64: digest.to_base64(),
			digest,
			chain: Vec::new(),
			verification: None,
		}
	}

	pub fn with_chain(mut self, steps: Vec<Digest>) -> Self {
		self.chain = steps;
		self
	}

	pub fn with_verification(mut self, verification: Verification) -> Self {
		self.verification = Some(verification);
		self
	}

	pub fn matched(&self) -> Option<bool> {
		self.verification.as_ref().map(|outcome| outcome.matched)
	}
}

#[derive(Debug)]
pub struct OutputError {
	message: String,
}

impl OutputError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

impl fmt::Display for OutputError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for OutputError {}

/// Renders `report` as stdout lines.
///
/// Quiet mode prints bare values (`true`/`false` for verification),
/// the default mode adds the headings the tool has always printed.
pub fn render(
	report: &DigestReport,
	format: OutputFormat,
	quiet: bool,
) -> Result<Vec<String>, OutputError> {
	if format == OutputFormat::Json {
		let serialized = serde_json::to_string_pretty(report)
			.map_err(|err| OutputError::new(err.to_string()))?;
		return Ok(serialized.lines().map(str::to_owned).collect());
	}

	let mut lines = Vec::new();
	let value = format.encode(&report.digest);
	for (index, step) in report.chain.iter().enumerate() {
		if quiet {
			lines.push(format.encode(step));
		} else {
			lines.push(format!("[{}] {}", index + 1, format.encode(step)));
		}
	}

	if let Some(outcome) = &report.verification {
		if quiet {
			lines.push(outcome.matched.to_string());
		} else {
			// The compared value is always hex, whatever `format` is.
			lines.push(outcome.computed.clone());
			lines.push(if outcome.matched {
				"Secure hashes MATCH!".to_string()
			} else {
				"Secure hashes DON'T MATCH!".to_string()
			});
		}
		return Ok(lines);
	}

	if quiet {
		if report.chain.is_empty() {
			lines.push(value);
		}
		return Ok(lines);
	}

	let heading = if report.iterations > 0 {
		format!(
			"{} secure hash in {} ({} iterations):",
			report.algorithm, format, report.iterations
		)
	} else {
		format!("{} secure hash in {}:", report.algorithm, format)
	};
	lines.push(heading);
	lines.push(value);
	Ok(lines)
}
