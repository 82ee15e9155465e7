// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: registry.rs
// Author: hashgen maintainers

//! Catalog of digest algorithms and the registry that resolves names to
//! fresh [`Hasher`] instances.
//!
//! The registry holds a capability set chosen at construction. Callers
//! that want to narrow the selection (per deployment, per environment
//! variable) build it with [`AlgorithmRegistry::with_capabilities`].

use crate::hgen::error::{DigestError, DigestErrorKind};
use crate::hgen::hasher::Hasher;
use digest::DynDigest;
use skein::consts::{U128, U32, U64};
use skein::{Skein1024, Skein256, Skein512};

pub type HasherFactory = fn() -> Box<dyn DynDigest>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
	Fixed,
	/// Needs a caller supplied output length (XOF). Not constructible.
	Variable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmMetadata {
	pub identifier: &'static str,
	pub display_name: &'static str,
	pub output: OutputKind,
	pub weak: bool,
}

impl AlgorithmMetadata {
	pub const fn new(
		identifier: &'static str,
		display_name: &'static str,
		output: OutputKind,
		weak: bool,
	) -> Self {
		Self {
			identifier,
			display_name,
			output,
			weak,
		}
	}

	pub const fn current(
		identifier: &'static str,
		display_name: &'static str,
	) -> Self {
		Self::new(identifier, display_name, OutputKind::Fixed, false)
	}

	pub const fn weak(
		identifier: &'static str,
		display_name: &'static str,
	) -> Self {
		Self::new(identifier, display_name, OutputKind::Fixed, true)
	}

	pub const fn variable(
		identifier: &'static str,
		display_name: &'static str,
	) -> Self {
		Self::new(identifier, display_name, OutputKind::Variable, false)
	}

	pub fn is_variable_length(&self) -> bool {
		self.output == OutputKind::Variable
	}
}

#[derive(Clone, Copy, Debug)]
pub struct DigestAlgorithm {
	pub metadata: AlgorithmMetadata,
	factory: Option<HasherFactory>,
}

impl DigestAlgorithm {
	const fn fixed(
		metadata: AlgorithmMetadata,
		factory: HasherFactory,
	) -> Self {
		Self {
			metadata,
			factory: Some(factory),
		}
	}

	const fn variable(metadata: AlgorithmMetadata) -> Self {
		Self {
			metadata,
			factory: None,
		}
	}

	pub fn identifier(&self) -> &'static str {
		self.metadata.identifier
	}

	/// Digest length in bytes, `None` for variable-length families.
	pub fn output_size(&self) -> Option<usize> {
		self.factory.map(|factory| factory().output_size())
	}

	fn instantiate(&self) -> Option<Hasher> {
		self.factory
			.map(|factory| Hasher::new(self.metadata, factory()))
	}
}

fn boxed<D>() -> Box<dyn DynDigest>
where
	D: DynDigest + Default + 'static,
{
	Box::new(D::default())
}

macro_rules! current {
	($id:expr, $name:expr, $ty:ty) => {
		DigestAlgorithm::fixed(
			AlgorithmMetadata::current($id, $name),
			boxed::<$ty>,
		)
	};
}

macro_rules! weak {
	($id:expr, $name:expr, $ty:ty) => {
		DigestAlgorithm::fixed(
			AlgorithmMetadata::weak($id, $name),
			boxed::<$ty>,
		)
	};
}

/// Every algorithm this build knows about, including the
/// variable-length ones that the registry never hands out.
pub fn catalog() -> &'static [DigestAlgorithm] {
	const ALGORITHMS: &[DigestAlgorithm] = &[
		current!("ascon", "Ascon-Hash", ascon_hash::AsconHash),
		current!("belt-hash", "BelT", belt_hash::BeltHash),
		current!("blake2b", "BLAKE2b-512", blake2::Blake2b512),
		current!("blake2s", "BLAKE2s-256", blake2::Blake2s256),
		current!("blake3", "BLAKE3", blake3::Hasher),
		current!("fsb160", "FSB-160", fsb::Fsb160),
		current!("fsb224", "FSB-224", fsb::Fsb224),
		current!("fsb256", "FSB-256", fsb::Fsb256),
		current!("fsb384", "FSB-384", fsb::Fsb384),
		current!("fsb512", "FSB-512", fsb::Fsb512),
		current!("gost94", "GOST R 34.11-94", gost94::Gost94Test),
		current!("gost94-ua", "GOST 34.311-95", gost94::Gost94UA),
		current!("groestl", "Groestl-256", groestl::Groestl256),
		current!("jh224", "JH-224", jh::Jh224),
		current!("jh256", "JH-256", jh::Jh256),
		current!("jh384", "JH-384", jh::Jh384),
		current!("jh512", "JH-512", jh::Jh512),
		current!("keccak224", "Keccak-224", sha3::Keccak224),
		current!("keccak256", "Keccak-256", sha3::Keccak256),
		current!("keccak384", "Keccak-384", sha3::Keccak384),
		current!("keccak512", "Keccak-512", sha3::Keccak512),
		weak!("md2", "MD2", md2::Md2),
		weak!("md4", "MD4", md4::Md4),
		weak!("md5", "MD5", md5::Md5),
		current!("ripemd160", "RIPEMD-160", ripemd::Ripemd160),
		current!("ripemd320", "RIPEMD-320", ripemd::Ripemd320),
		weak!("sha1", "SHA-1", sha1::Sha1),
		current!("sha224", "SHA-224", sha2::Sha224),
		current!("sha256", "SHA-256", sha2::Sha256),
		current!("sha3-224", "SHA3-224", sha3::Sha3_224),
		current!("sha3-256", "SHA3-256", sha3::Sha3_256),
		current!("sha3-384", "SHA3-384", sha3::Sha3_384),
		current!("sha3-512", "SHA3-512", sha3::Sha3_512),
		current!("sha384", "SHA-384", sha2::Sha384),
		current!("sha512", "SHA-512", sha2::Sha512),
		current!("sha512-224", "SHA-512/224", sha2::Sha512_224),
		current!("sha512-256", "SHA-512/256", sha2::Sha512_256),
		current!("shabal192", "Shabal-192", shabal::Shabal192),
		current!("shabal224", "Shabal-224", shabal::Shabal224),
		current!("shabal256", "Shabal-256", shabal::Shabal256),
		current!("shabal384", "Shabal-384", shabal::Shabal384),
		current!("shabal512", "Shabal-512", shabal::Shabal512),
		DigestAlgorithm::variable(AlgorithmMetadata::variable(
			"shake128", "SHAKE128",
		)),
		DigestAlgorithm::variable(AlgorithmMetadata::variable(
			"shake256", "SHAKE256",
		)),
		current!("skein1024", "Skein-1024-1024", Skein1024<U128>),
		current!("skein256", "Skein-256-256", Skein256<U32>),
		current!("skein512", "Skein-512-512", Skein512<U64>),
		current!("sm3", "SM3", sm3::Sm3),
		current!("streebog256", "Streebog-256", streebog::Streebog256),
		current!("streebog512", "Streebog-512", streebog::Streebog512),
		current!("tiger", "Tiger", tiger::Tiger),
		current!("whirlpool", "Whirlpool", whirlpool::Whirlpool),
	];
	ALGORITHMS
}

/// Lookup key: ASCII lowercase with separators dropped, so `SHA3_256`,
/// `sha3-256` and `sha3256` are the same name.
fn lookup_key(name: &str) -> String {
	name.trim()
		.chars()
		.filter(|c| !matches!(c, '-' | '_' | '/' | ' '))
		.map(|c| c.to_ascii_lowercase())
		.collect()
}

pub fn find_algorithm(name: &str) -> Option<&'static DigestAlgorithm> {
	let needle = lookup_key(name);
	catalog()
		.iter()
		.find(|alg| lookup_key(alg.metadata.identifier) == needle)
}

fn variable_length_error(algorithm: &DigestAlgorithm) -> DigestError {
	DigestError::new(
		DigestErrorKind::UnsupportedAlgorithm,
		format!(
			"{} needs an explicit output length and is not supported",
			algorithm.metadata.identifier
		),
	)
}

/// Resolves algorithm names to hashers within a fixed capability set.
///
/// Immutable once built; share it by reference across callers.
#[derive(Clone, Debug)]
pub struct AlgorithmRegistry {
	enabled: Vec<&'static DigestAlgorithm>,
}

impl AlgorithmRegistry {
	/// Every fixed-output algorithm in the catalog.
	pub fn builtin() -> Self {
		let mut enabled: Vec<_> = catalog()
			.iter()
			.filter(|alg| !alg.metadata.is_variable_length())
			.collect();
		enabled.sort_by_key(|alg| alg.metadata.identifier);
		Self { enabled }
	}

	/// Restricts the registry to the named algorithms.
	///
	/// Unknown or variable-length names are rejected, and so is a list
	/// that resolves to nothing.
	pub fn with_capabilities<I, S>(names: I) -> Result<Self, DigestError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut enabled: Vec<&'static DigestAlgorithm> = Vec::new();
		for name in names {
			let name = name.as_ref();
			if name.trim().is_empty() {
				continue;
			}
			let algorithm = find_algorithm(name)
				.ok_or_else(|| DigestError::unsupported(name))?;
			if algorithm.metadata.is_variable_length() {
				return Err(variable_length_error(algorithm));
			}
			if !enabled
				.iter()
				.any(|known| known.identifier() == algorithm.identifier())
			{
				enabled.push(algorithm);
			}
		}
		if enabled.is_empty() {
			return Err(DigestError::new(
				DigestErrorKind::InvalidConfiguration,
				"capability set does not name any digest algorithm",
			));
		}
		enabled.sort_by_key(|alg| alg.metadata.identifier);
		tracing::debug!(
			count = enabled.len(),
			"registry restricted to capability set"
		);
		Ok(Self { enabled })
	}

	/// Sorted identifiers of every algorithm that `create` accepts.
	pub fn list_available(&self) -> Vec<&'static str> {
		self.enabled.iter().map(|alg| alg.identifier()).collect()
	}

	pub fn algorithms(
		&self,
	) -> impl Iterator<Item = &'static DigestAlgorithm> + '_ {
		self.enabled.iter().copied()
	}

	pub fn resolve(
		&self,
		name: &str,
	) -> Result<&'static DigestAlgorithm, DigestError> {
		let algorithm = find_algorithm(name)
			.ok_or_else(|| DigestError::unsupported(name))?;
		if algorithm.metadata.is_variable_length() {
			return Err(variable_length_error(algorithm));
		}
		if !self
			.enabled
			.iter()
			.any(|alg| alg.identifier() == algorithm.identifier())
		{
			return Err(DigestError::unsupported(name));
		}
		Ok(algorithm)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.resolve(name).is_ok()
	}

	/// Builds a fresh, empty hasher for `name`.
	pub fn create(&self, name: &str) -> Result<Hasher, DigestError> {
		let algorithm = self.resolve(name)?;
		let hasher = algorithm
			.instantiate()
			.ok_or_else(|| variable_length_error(algorithm))?;
		tracing::trace!(algorithm = algorithm.identifier(), "hasher created");
		Ok(hasher)
	}
}

impl Default for AlgorithmRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}
