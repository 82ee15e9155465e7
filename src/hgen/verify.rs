// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: verify.rs
// Author: hashgen maintainers

use crate::hgen::digest::Digest;
use serde::Serialize;

/// Outcome of comparing a computed digest with a reference value.
///
/// A mismatch is an ordinary result, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verification {
	pub matched: bool,
	pub computed: String,
	pub reference: String,
}

/// Trims and lowercases a user supplied reference digest.
pub fn normalize_reference(reference: &str) -> String {
	reference.trim().to_ascii_lowercase()
}

pub fn verify(computed: &Digest, reference: &str) -> Verification {
	let computed = computed.to_hex();
	let reference = normalize_reference(reference);
	let matched = computed == reference;
	tracing::debug!(matched, "digest verified against reference");
	Verification {
		matched,
		computed,
		reference,
	}
}
