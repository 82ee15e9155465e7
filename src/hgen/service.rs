// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: service.rs
// Author: hashgen maintainers

//! Facade bundling a registry and an engine. This is the surface the
//! CLI calls, and what any other front end should wrap.

use crate::hgen::chain::{self, HashChain};
use crate::hgen::digest::Digest;
use crate::hgen::engine::{
	ByteSource, ChunkProgress, DigestEngine, EngineConfig,
};
use crate::hgen::error::DigestError;
use crate::hgen::registry::AlgorithmRegistry;
use crate::hgen::verify::{self, Verification};
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct DigestService {
	registry: AlgorithmRegistry,
	engine: DigestEngine,
}

impl DigestService {
	pub fn new(registry: AlgorithmRegistry, engine: DigestEngine) -> Self {
		Self { registry, engine }
	}

	pub fn with_config(
		registry: AlgorithmRegistry,
		config: EngineConfig,
	) -> Result<Self, DigestError> {
		Ok(Self::new(registry, DigestEngine::new(config)?))
	}

	pub fn registry(&self) -> &AlgorithmRegistry {
		&self.registry
	}

	pub fn engine(&self) -> &DigestEngine {
		&self.engine
	}

	pub fn list_available(&self) -> Vec<&'static str> {
		self.registry.list_available()
	}

	pub fn digest_bytes(
		&self,
		algorithm: &str,
		bytes: &[u8],
	) -> Result<Digest, DigestError> {
		let hasher = self.registry.create(algorithm)?;
		self.engine.digest(hasher, ByteSource::Buffer(bytes))
	}

	/// Digest of the UTF-8 bytes of `text`.
	pub fn digest_text(
		&self,
		algorithm: &str,
		text: &str,
	) -> Result<Digest, DigestError> {
		self.digest_bytes(algorithm, text.as_bytes())
	}

	pub fn digest_file(
		&self,
		algorithm: &str,
		path: &Path,
	) -> Result<Digest, DigestError> {
		self.digest_file_with_progress(algorithm, path, |_| true)
	}

	pub fn digest_file_with_progress<F>(
		&self,
		algorithm: &str,
		path: &Path,
		on_chunk: F,
	) -> Result<Digest, DigestError>
	where
		F: FnMut(&ChunkProgress) -> bool,
	{
		let hasher = self.registry.create(algorithm)?;
		self.engine
			.digest_with_progress(hasher, ByteSource::File(path), on_chunk)
	}

	pub fn chain(
		&self,
		algorithm: &str,
		initial: &Digest,
		iterations: u64,
	) -> Result<HashChain, DigestError> {
		chain::chain(&self.registry, algorithm, initial, iterations)
	}

	pub fn chain_final(
		&self,
		algorithm: &str,
		initial: &Digest,
		iterations: u64,
	) -> Result<Digest, DigestError> {
		chain::chain_final(&self.registry, algorithm, initial, iterations)
	}

	pub fn verify(&self, digest: &Digest, reference: &str) -> Verification {
		verify::verify(digest, reference)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hgen::error::DigestErrorKind;
	use std::io::Write;

	#[test]
	fn text_and_file_digests_agree() {
		let service = DigestService::default();
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all("grüße".as_bytes()).unwrap();
		let from_text = service.digest_text("sha1", "grüße").unwrap();
		let from_file = service.digest_file("sha1", file.path()).unwrap();
		assert_eq!(from_text, from_file);
	}

	#[test]
	fn repeated_calls_are_deterministic() {
		let service = DigestService::default();
		for name in service.list_available() {
			let first = service.digest_text(name, "determinism").unwrap();
			let second = service.digest_text(name, "determinism").unwrap();
			assert_eq!(first, second, "{}", name);
			assert_eq!(first.algorithm(), name);
		}
	}

	#[test]
	fn restricted_service_rejects_other_algorithms() {
		let registry =
			AlgorithmRegistry::with_capabilities(["sha256"]).unwrap();
		let service =
			DigestService::with_config(registry, EngineConfig::default())
				.unwrap();
		assert_eq!(service.list_available(), vec!["sha256"]);
		let err = service.digest_text("md5", "x").unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::UnsupportedAlgorithm);
	}

	#[test]
	fn chain_then_verify() {
		let service = DigestService::default();
		let digest = service.digest_text("sha256", "abc").unwrap();
		let last = service.chain_final("sha256", &digest, 2).unwrap();
		let outcome = service.verify(
			&last,
			"F2A778F1A6ED3D5BC59A5D79104C598F3F07093F240CA4E91333FB09ED4F36DA",
		);
		assert!(outcome.matched);
	}
}
