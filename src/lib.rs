// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: lib.rs
// Author: hashgen maintainers

//! Digest computation core: an algorithm registry, a streaming engine,
//! iterative re-hashing and verification, plus the `hgen` CLI on top.

pub mod hgen {
	pub mod app;
	pub mod chain;
	pub mod digest;
	pub mod engine;
	pub mod error;
	pub mod hasher;
	pub mod output;
	pub mod progress;
	pub mod registry;
	pub mod service;
	pub mod verify;
	pub mod weak;
}

pub use hgen::digest::{to_hex, Digest};
pub use hgen::error::{DigestError, DigestErrorKind};
pub use hgen::registry::AlgorithmRegistry;
pub use hgen::service::DigestService;
pub use hgen::verify::Verification;
