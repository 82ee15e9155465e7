// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: engine.rs
// Author: hashgen maintainers

//! Streams a byte source through a [`Hasher`] in fixed-size blocks.

use crate::hgen::digest::Digest;
use crate::hgen::error::{DigestError, DigestErrorKind};
use crate::hgen::hasher::Hasher;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default chunk length used when streaming files (64 KiB).
pub const BLOCK_SIZE: usize = 65536;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
	pub block_size: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		EngineConfig {
			block_size: BLOCK_SIZE,
		}
	}
}

/// Input handed to the engine for one digest call.
#[derive(Clone, Copy, Debug)]
pub enum ByteSource<'a> {
	Buffer(&'a [u8]),
	File(&'a Path),
}

impl<'a> ByteSource<'a> {
	pub fn text(text: &'a str) -> Self {
		ByteSource::Buffer(text.as_bytes())
	}
}

/// Reported to the chunk callback after every block fed to the hasher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkProgress {
	pub chunk_len: usize,
	pub bytes_processed: u64,
	pub total_bytes: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct DigestEngine {
	config: EngineConfig,
}

impl DigestEngine {
	pub fn new(config: EngineConfig) -> Result<Self, DigestError> {
		if config.block_size == 0 {
			return Err(DigestError::new(
				DigestErrorKind::InvalidConfiguration,
				"block size must be greater than zero",
			));
		}
		Ok(Self { config })
	}

	pub fn block_size(&self) -> usize {
		self.config.block_size
	}

	pub fn digest(
		&self,
		hasher: Hasher,
		source: ByteSource<'_>,
	) -> Result<Digest, DigestError> {
		self.digest_with_progress(hasher, source, |_| true)
	}

	/// Like [`digest`](Self::digest) but calls `on_chunk` after each
	/// block. Returning `false` from the callback stops the stream with a
	/// [`DigestErrorKind::Cancelled`] error.
	pub fn digest_with_progress<F>(
		&self,
		hasher: Hasher,
		source: ByteSource<'_>,
		on_chunk: F,
	) -> Result<Digest, DigestError>
	where
		F: FnMut(&ChunkProgress) -> bool,
	{
		match source {
			ByteSource::Buffer(bytes) => {
				self.digest_buffer(hasher, bytes, on_chunk)
			}
			ByteSource::File(path) => {
				self.digest_path(hasher, path, on_chunk)
			}
		}
	}

	fn digest_buffer<F>(
		&self,
		mut hasher: Hasher,
		bytes: &[u8],
		mut on_chunk: F,
	) -> Result<Digest, DigestError>
	where
		F: FnMut(&ChunkProgress) -> bool,
	{
		let total = bytes.len() as u64;
		let mut processed = 0u64;
		for chunk in bytes.chunks(self.config.block_size) {
			hasher.update(chunk);
			processed += chunk.len() as u64;
			let progress = ChunkProgress {
				chunk_len: chunk.len(),
				bytes_processed: processed,
				total_bytes: Some(total),
			};
			if !on_chunk(&progress) {
				return Err(DigestError::cancelled());
			}
		}
		let digest = hasher.finalize();
		tracing::debug!(
			algorithm = digest.algorithm(),
			bytes = total,
			"buffer digested"
		);
		Ok(digest)
	}

	fn digest_path<F>(
		&self,
		hasher: Hasher,
		path: &Path,
		on_chunk: F,
	) -> Result<Digest, DigestError>
	where
		F: FnMut(&ChunkProgress) -> bool,
	{
		let metadata = std::fs::metadata(path)
			.map_err(|err| DigestError::from_io(path, err))?;
		if metadata.is_dir() {
			return Err(DigestError::new(
				DigestErrorKind::Io,
				format!("{} is a directory", path.display()),
			));
		}
		let file =
			File::open(path).map_err(|err| DigestError::from_io(path, err))?;
		let digest = self.stream(
			hasher,
			file,
			Some(metadata.len()),
			on_chunk,
			|err| DigestError::from_io(path, err),
		)?;
		tracing::debug!(
			algorithm = digest.algorithm(),
			path = %path.display(),
			"file digested"
		);
		Ok(digest)
	}

	/// Streams any reader through `hasher`.
	///
	/// Every block handed to the hasher is exactly `block_size` bytes
	/// except the last one. A failed read drops the hasher and returns
	/// the error; no partial digest escapes.
	pub fn digest_reader<R, F>(
		&self,
		hasher: Hasher,
		reader: R,
		total_bytes: Option<u64>,
		on_chunk: F,
	) -> Result<Digest, DigestError>
	where
		R: Read,
		F: FnMut(&ChunkProgress) -> bool,
	{
		self.stream(hasher, reader, total_bytes, on_chunk, DigestError::from)
	}

	fn stream<R, F, E>(
		&self,
		mut hasher: Hasher,
		mut reader: R,
		total_bytes: Option<u64>,
		mut on_chunk: F,
		on_error: E,
	) -> Result<Digest, DigestError>
	where
		R: Read,
		F: FnMut(&ChunkProgress) -> bool,
		E: Fn(io::Error) -> DigestError,
	{
		let mut buffer = vec![0u8; self.config.block_size];
		let mut processed = 0u64;
		loop {
			let count =
				fill_block(&mut reader, &mut buffer).map_err(&on_error)?;
			if count == 0 {
				break;
			}
			hasher.update(&buffer[..count]);
			processed += count as u64;
			tracing::trace!(chunk = count, processed, "chunk fed");
			let progress = ChunkProgress {
				chunk_len: count,
				bytes_processed: processed,
				total_bytes,
			};
			if !on_chunk(&progress) {
				tracing::debug!(processed, "digest cancelled by caller");
				return Err(DigestError::cancelled());
			}
			if count < buffer.len() {
				break;
			}
		}
		Ok(hasher.finalize())
	}
}

/// Reads until `buffer` is full or the reader is exhausted.
fn fill_block<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buffer.len() {
		match reader.read(&mut buffer[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
			Err(err) => return Err(err),
		}
	}
	Ok(filled)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hgen::registry::AlgorithmRegistry;
	use std::io::{Cursor, Write};

	fn sample_bytes(len: usize) -> Vec<u8> {
		(0..len).map(|i| (i * 31 % 251) as u8).collect()
	}

	fn engine(block_size: usize) -> DigestEngine {
		DigestEngine::new(EngineConfig { block_size }).expect("engine")
	}

	/// Hands out at most `step` bytes per read call.
	struct Trickle {
		data: Cursor<Vec<u8>>,
		step: usize,
	}

	impl Read for Trickle {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			let len = buf.len().min(self.step);
			self.data.read(&mut buf[..len])
		}
	}

	/// Yields `good` bytes, then fails.
	struct Broken {
		good: usize,
	}

	impl Read for Broken {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			if self.good == 0 {
				return Err(io::Error::new(
					io::ErrorKind::Other,
					"device unplugged",
				));
			}
			let len = buf.len().min(self.good);
			buf[..len].fill(0x5A);
			self.good -= len;
			Ok(len)
		}
	}

	#[test]
	fn zero_block_size_is_rejected() {
		let err = DigestEngine::new(EngineConfig { block_size: 0 })
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::InvalidConfiguration);
	}

	#[test]
	fn file_digest_is_independent_of_block_size() {
		let registry = AlgorithmRegistry::builtin();
		let data = sample_bytes(200_003);
		let mut file = tempfile::NamedTempFile::new().expect("temp");
		file.write_all(&data).expect("write");
		let reference = engine(BLOCK_SIZE)
			.digest(
				registry.create("sha256").unwrap(),
				ByteSource::Buffer(&data),
			)
			.expect("buffer digest");
		for block_size in [1, 64, BLOCK_SIZE] {
			let digest = engine(block_size)
				.digest(
					registry.create("sha256").unwrap(),
					ByteSource::File(file.path()),
				)
				.expect("file digest");
			assert_eq!(digest, reference, "block size {}", block_size);
		}
	}

	#[test]
	fn chunks_are_full_blocks_except_the_last() {
		let registry = AlgorithmRegistry::builtin();
		let data = sample_bytes(1000);
		let reader = Trickle {
			data: Cursor::new(data.clone()),
			step: 7,
		};
		let mut sizes = Vec::new();
		let digest = engine(64)
			.digest_reader(
				registry.create("md5").unwrap(),
				reader,
				None,
				|progress| {
					sizes.push(progress.chunk_len);
					true
				},
			)
			.expect("digest");
		let (last, full) = sizes.split_last().expect("chunks");
		assert!(full.iter().all(|&size| size == 64));
		assert_eq!(*last, 1000 % 64);
		let expected = engine(64)
			.digest(
				registry.create("md5").unwrap(),
				ByteSource::Buffer(&data),
			)
			.unwrap();
		assert_eq!(digest, expected);
	}

	#[test]
	fn callback_can_cancel() {
		let registry = AlgorithmRegistry::builtin();
		let data = sample_bytes(4096);
		let mut calls = 0;
		let err = engine(256)
			.digest_with_progress(
				registry.create("sha1").unwrap(),
				ByteSource::Buffer(&data),
				|progress| {
					calls += 1;
					progress.bytes_processed < 1024
				},
			)
			.unwrap_err();
		assert!(err.is_cancelled());
		assert_eq!(calls, 4);
	}

	#[test]
	fn callback_can_cancel_a_file_stream() {
		let registry = AlgorithmRegistry::builtin();
		let mut file = tempfile::NamedTempFile::new().expect("temp");
		file.write_all(&sample_bytes(10_000)).expect("write");
		let mut calls = 0;
		let err = engine(1000)
			.digest_with_progress(
				registry.create("sha256").unwrap(),
				ByteSource::File(file.path()),
				|progress| {
					calls += 1;
					progress.bytes_processed < 3000
				},
			)
			.unwrap_err();
		assert!(err.is_cancelled());
		assert_ne!(err.kind(), DigestErrorKind::Io);
		assert_eq!(calls, 3);
	}

	#[test]
	fn callback_can_cancel_a_reader() {
		let registry = AlgorithmRegistry::builtin();
		let reader = Trickle {
			data: Cursor::new(sample_bytes(500)),
			step: 3,
		};
		let mut seen = Vec::new();
		let err = engine(100)
			.digest_reader(
				registry.create("md5").unwrap(),
				reader,
				Some(500),
				|progress| {
					seen.push(progress.bytes_processed);
					seen.len() < 2
				},
			)
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::Cancelled);
		assert_eq!(seen, vec![100, 200]);
	}

	#[test]
	fn file_read_failure_names_the_path() {
		let registry = AlgorithmRegistry::builtin();
		let path = Path::new("disk.img");
		let err = engine(16)
			.stream(
				registry.create("sha256").unwrap(),
				Broken { good: 40 },
				Some(64),
				|_| true,
				|err| DigestError::from_io(path, err),
			)
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::Io);
		assert!(err.message().contains("disk.img"));
		assert!(err.message().contains("device unplugged"));
	}

	#[test]
	fn read_failure_yields_io_error() {
		let registry = AlgorithmRegistry::builtin();
		let err = engine(16)
			.digest_reader(
				registry.create("sha256").unwrap(),
				Broken { good: 40 },
				None,
				|_| true,
			)
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::Io);
		assert!(err.message().contains("device unplugged"));
	}

	#[test]
	fn missing_file_and_directory() {
		let registry = AlgorithmRegistry::builtin();
		let dir = tempfile::tempdir().expect("tempdir");
		let missing = dir.path().join("absent.bin");
		let err = DigestEngine::default()
			.digest(
				registry.create("sha256").unwrap(),
				ByteSource::File(&missing),
			)
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::FileNotFound);

		let err = DigestEngine::default()
			.digest(
				registry.create("sha256").unwrap(),
				ByteSource::File(dir.path()),
			)
			.unwrap_err();
		assert_eq!(err.kind(), DigestErrorKind::Io);
	}

	#[test]
	fn empty_inputs_still_finalize() {
		let registry = AlgorithmRegistry::builtin();
		let file = tempfile::NamedTempFile::new().expect("temp");
		let from_file = DigestEngine::default()
			.digest(
				registry.create("md5").unwrap(),
				ByteSource::File(file.path()),
			)
			.unwrap();
		let from_text = DigestEngine::default()
			.digest(registry.create("md5").unwrap(), ByteSource::text(""))
			.unwrap();
		assert_eq!(from_file.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
		assert_eq!(from_file, from_text);
	}
}
