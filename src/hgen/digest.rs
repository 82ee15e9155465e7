// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: digest.rs
// Author: hashgen maintainers

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};
use std::fmt;

/// Finalized output of a [`Hasher`](crate::hgen::hasher::Hasher).
///
/// The byte length is fixed per algorithm. A digest remembers which
/// algorithm produced it so chains and reports can label it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest {
	algorithm: &'static str,
	bytes: Box<[u8]>,
}

impl Digest {
	pub fn new(algorithm: &'static str, bytes: impl Into<Box<[u8]>>) -> Self {
		Self {
			algorithm,
			bytes: bytes.into(),
		}
	}

	pub fn algorithm(&self) -> &'static str {
		self.algorithm
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn to_hex(&self) -> String {
		hex::encode(&self.bytes)
	}

	pub fn to_base64(&self) -> String {
		STANDARD.encode(&self.bytes)
	}
}

impl AsRef<[u8]> for Digest {
	fn as_ref(&self) -> &[u8] {
		&self.bytes
	}
}

impl fmt::Display for Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl Serialize for Digest {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_hex())
	}
}

/// Lowercase hexadecimal rendering without separators.
pub fn to_hex(digest: &Digest) -> String {
	digest.to_hex()
}
