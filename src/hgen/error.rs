// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: error.rs
// Author: hashgen maintainers

//! Error type shared by the registry, the streaming engine and the
//! chain builder.

use std::borrow::Cow;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestErrorKind {
	UnsupportedAlgorithm,
	FileNotFound,
	Io,
	Cancelled,
	InvalidConfiguration,
}

#[derive(Debug)]
pub struct DigestError {
	kind: DigestErrorKind,
	message: Cow<'static, str>,
	source: Option<io::Error>,
}

impl DigestError {
	pub fn new(
		kind: DigestErrorKind,
		message: impl Into<Cow<'static, str>>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
			source: None,
		}
	}

	pub fn unsupported(algorithm: &str) -> Self {
		Self::new(
			DigestErrorKind::UnsupportedAlgorithm,
			format!("unsupported digest algorithm `{}`", algorithm),
		)
	}

	pub fn cancelled() -> Self {
		Self::new(DigestErrorKind::Cancelled, "digest cancelled")
	}

	/// Wraps an I/O failure on `path`, promoting `NotFound` to
	/// [`DigestErrorKind::FileNotFound`].
	pub fn from_io(path: &Path, err: io::Error) -> Self {
		let kind = match err.kind() {
			io::ErrorKind::NotFound => DigestErrorKind::FileNotFound,
			_ => DigestErrorKind::Io,
		};
		let message = match kind {
			DigestErrorKind::FileNotFound => {
				format!("file not found: {}", path.display())
			}
			_ => format!("cannot read {}: {}", path.display(), err),
		};
		Self {
			kind,
			message: message.into(),
			source: Some(err),
		}
	}

	pub fn kind(&self) -> DigestErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		self.message.as_ref()
	}

	pub fn is_cancelled(&self) -> bool {
		self.kind == DigestErrorKind::Cancelled
	}
}

impl From<io::Error> for DigestError {
	fn from(err: io::Error) -> Self {
		Self {
			kind: DigestErrorKind::Io,
			message: format!("read failed: {}", err).into(),
			source: Some(err),
		}
	}
}

impl std::fmt::Display for DigestError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for DigestError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|err| err as &(dyn std::error::Error + 'static))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn not_found_is_promoted() {
		let err = DigestError::from_io(
			Path::new("missing.bin"),
			io::Error::new(io::ErrorKind::NotFound, "gone"),
		);
		assert_eq!(err.kind(), DigestErrorKind::FileNotFound);
		assert!(err.to_string().contains("missing.bin"));
		assert!(err.source().is_some());
	}

	#[test]
	fn other_io_errors_stay_io() {
		let err = DigestError::from_io(
			Path::new("locked.bin"),
			io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		);
		assert_eq!(err.kind(), DigestErrorKind::Io);
		assert!(err.message().contains("denied"));
	}
}
