// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen

use hashgen::hgen::service::DigestService;
use hashgen::{to_hex, DigestErrorKind};
use hex_literal::hex;

const PHRASE: &str =
	"Jeder wackere Bayer vertilgt bequem zwo Pfund Kalbshaxen.";

fn digest(algorithm: &str, input: &str) -> Vec<u8> {
	DigestService::default()
		.digest_text(algorithm, input)
		.expect("digest")
		.as_bytes()
		.to_vec()
}

#[test]
fn sha256_abc() {
	let digest = DigestService::default()
		.digest_text("sha256", "abc")
		.expect("digest");
	assert_eq!(
		to_hex(&digest),
		"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
	);
}

#[test]
fn md5_empty_string() {
	let digest =
		DigestService::default().digest_text("md5", "").expect("digest");
	assert_eq!(to_hex(&digest), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn blake2b_phrase() {
	assert_eq!(digest("blake2b", PHRASE)[..], hex!("95b7ecb0d7de59820205a0a94fe3ca5ee36fd296b1a9ecaa4e01634aed9fa9505d70182c12f900b9dd95f1d5c04fe57dbc5b1e48acdf3a8bae2996f5d8f4578a"));
}

#[test]
fn blake2s_phrase() {
	assert_eq!(digest("blake2s", PHRASE)[..], hex!("dbfd3f2c835adcc9fc955d812384bb3bf569de0b9613ffca0e723254c05cf497"));
}

#[test]
fn gost94_phrase() {
	assert_eq!(digest("gost94", PHRASE)[..], hex!("1845acc06577ead1f5b671e7e452fc6064e90ab1bbb536df36a91327e40e1872"));
}

#[test]
fn groestl_phrase() {
	assert_eq!(digest("groestl", PHRASE)[..], hex!("f65cae36b7a0cb51e8ee732f4090ffacaa8f910a793596046073b8457bc4a356"));
}

#[test]
fn sha1_phrase() {
	assert_eq!(digest("sha1", PHRASE)[..], hex!("1C90817FE5067AB226A331D4E7454858F6DD966A"));
}

#[test]
fn sha3_256_phrase() {
	assert_eq!(digest("sha3_256", PHRASE)[..], hex!("7f3b18201d8a0243af7f0190024211066a91c9579889fc80df52e7981de814ef"));
}

#[test]
fn ripemd160_abc() {
	assert_eq!(digest("ripemd160", "abc")[..], hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
}

#[test]
fn sha512_256_abc() {
	assert_eq!(digest("sha512/256", "abc")[..], hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"));
}

#[test]
fn unlisted_name_is_unsupported() {
	let service = DigestService::default();
	assert!(!service.list_available().contains(&"crc32"));
	let err = service.digest_text("crc32", "abc").unwrap_err();
	assert_eq!(err.kind(), DigestErrorKind::UnsupportedAlgorithm);
}
