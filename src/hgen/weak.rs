// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// Module: weak algorithm warnings
// Author: hashgen maintainers

//! Warning banners for digest algorithms with known collision attacks.

use crate::hgen::registry::{catalog, find_algorithm, AlgorithmMetadata};
use colored::Colorize;

const NIST_REFERENCE: &str =
	"https://doi.org/10.6028/NIST.SP.800-131Ar2";
const RFC6151_REFERENCE: &str = "https://www.rfc-editor.org/rfc/rfc6151";

const REFERENCES: &[&str] = &[NIST_REFERENCE, RFC6151_REFERENCE];

#[derive(Debug, Clone)]
pub struct WarningMessage {
	pub headline: String,
	pub body: String,
	pub references: &'static [&'static str],
}

impl WarningMessage {
	pub fn banner(&self) -> String {
		format!("warning: {} {}", self.headline, self.body)
	}
}

fn replacement_hint(identifier: &str) -> &'static str {
	match identifier {
		"md5" => "Use SHA-256 or BLAKE3 for new digests",
		"sha1" => "Use SHA-256 or SHA-512",
		_ => "Use SHA-256 or BLAKE3",
	}
}

/// Catalog metadata for `algorithm` when it is flagged weak.
pub fn metadata_for(algorithm: &str) -> Option<&'static AlgorithmMetadata> {
	find_algorithm(algorithm)
		.map(|alg| &alg.metadata)
		.filter(|metadata| metadata.weak)
}

pub fn warning_for(algorithm: &str) -> Option<WarningMessage> {
	let metadata = metadata_for(algorithm)?;
	Some(WarningMessage {
		headline: format!(
			"{} is a weak algorithm (collisions known).",
			metadata.display_name
		),
		body: format!(
			"Fine for checksums, not for security decisions. {}.",
			replacement_hint(metadata.identifier)
		),
		references: REFERENCES,
	})
}

pub fn all_metadata() -> impl Iterator<Item = &'static AlgorithmMetadata> {
	catalog()
		.iter()
		.map(|alg| &alg.metadata)
		.filter(|metadata| metadata.weak)
}

/// Prints the banner and its references to stderr.
pub fn emit_warning_banner(message: &WarningMessage) {
	eprintln!("{}", message.banner().yellow().bold());
	eprintln!(
		"{}",
		format!("References: {}", message.references.join(" | "))
			.yellow()
	);
}
