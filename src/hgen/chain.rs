// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: chain.rs
// Author: hashgen maintainers

//! Iterative re-hashing: digest `i` is the hash of the raw bytes of
//! digest `i - 1`, each step on a freshly created hasher.

use crate::hgen::digest::Digest;
use crate::hgen::error::DigestError;
use crate::hgen::registry::AlgorithmRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChain {
	initial: Digest,
	steps: Vec<Digest>,
}

impl HashChain {
	pub fn initial(&self) -> &Digest {
		&self.initial
	}

	/// Digests 1..=n, empty when no iterations were requested.
	pub fn steps(&self) -> &[Digest] {
		&self.steps
	}

	pub fn iterations(&self) -> usize {
		self.steps.len()
	}

	pub fn final_digest(&self) -> &Digest {
		self.steps.last().unwrap_or(&self.initial)
	}

	pub fn into_parts(self) -> (Vec<Digest>, Digest) {
		let HashChain { initial, steps } = self;
		let last = steps.last().cloned().unwrap_or(initial);
		(steps, last)
	}
}

fn rehash(
	registry: &AlgorithmRegistry,
	algorithm: &str,
	previous: &Digest,
) -> Result<Digest, DigestError> {
	let mut hasher = registry.create(algorithm)?;
	hasher.update(previous.as_bytes());
	Ok(hasher.finalize())
}

pub fn chain(
	registry: &AlgorithmRegistry,
	algorithm: &str,
	initial: &Digest,
	iterations: u64,
) -> Result<HashChain, DigestError> {
	registry.resolve(algorithm)?;
	let mut steps: Vec<Digest> =
		Vec::with_capacity(iterations.min(4096) as usize);
	for _ in 0..iterations {
		let previous = steps.last().unwrap_or(initial);
		let next = rehash(registry, algorithm, previous)?;
		steps.push(next);
	}
	tracing::debug!(algorithm, iterations, "hash chain built");
	Ok(HashChain {
		initial: initial.clone(),
		steps,
	})
}

/// Final digest of the chain without keeping intermediate steps.
pub fn chain_final(
	registry: &AlgorithmRegistry,
	algorithm: &str,
	initial: &Digest,
	iterations: u64,
) -> Result<Digest, DigestError> {
	registry.resolve(algorithm)?;
	let mut current = initial.clone();
	for _ in 0..iterations {
		current = rehash(registry, algorithm, &current)?;
	}
	tracing::debug!(algorithm, iterations, "hash chain folded");
	Ok(current)
}
