// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: hasher.rs
// Author: hashgen maintainers

use crate::hgen::digest::Digest;
use crate::hgen::registry::AlgorithmMetadata;
use digest::DynDigest;

/// Single-use incremental accumulator bound to one algorithm.
///
/// Obtained from [`AlgorithmRegistry::create`](crate::hgen::registry::AlgorithmRegistry::create).
/// `finalize` consumes the hasher, so a finalized hasher can never be
/// fed again or finalized twice.
pub struct Hasher {
	metadata: AlgorithmMetadata,
	inner: Box<dyn DynDigest>,
	bytes_fed: u64,
}

impl Hasher {
	pub(crate) fn new(
		metadata: AlgorithmMetadata,
		inner: Box<dyn DynDigest>,
	) -> Self {
		Self {
			metadata,
			inner,
			bytes_fed: 0,
		}
	}

	pub fn algorithm(&self) -> &'static str {
		self.metadata.identifier
	}

	pub fn metadata(&self) -> AlgorithmMetadata {
		self.metadata
	}

	pub fn output_size(&self) -> usize {
		self.inner.output_size()
	}

	pub fn bytes_fed(&self) -> u64 {
		self.bytes_fed
	}

	pub fn update(&mut self, data: &[u8]) {
		self.inner.update(data);
		self.bytes_fed += data.len() as u64;
	}

	pub fn finalize(self) -> Digest {
		Digest::new(self.metadata.identifier, self.inner.finalize())
	}
}

impl std::fmt::Debug for Hasher {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		f.debug_struct("Hasher")
			.field("algorithm", &self.metadata.identifier)
			.field("bytes_fed", &self.bytes_fed)
			.finish()
	}
}
