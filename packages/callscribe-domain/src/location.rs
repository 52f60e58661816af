use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Maximum accepted length for a business identifier.
pub const MAX_CALL_ID_LEN: usize = 255;

static S3_URI: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^s3://[a-z0-9][.\-a-z0-9]{1,61}[a-z0-9](/.*)?$").expect("S3 URI regex is static.")
});
static S3_PARTS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^s3://([^/]+)/(.+)$").expect("S3 parts regex is static."));

/// A bucket/key pair parsed from a scheme-qualified storage URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
	pub bucket: String,
	pub key: String,
}

pub fn is_valid_storage_uri(uri: &str) -> bool {
	S3_URI.is_match(uri)
}

pub fn parse_storage_uri(uri: &str) -> Option<StorageLocation> {
	let captures = S3_PARTS.captures(uri)?;

	Some(StorageLocation { bucket: captures[1].to_string(), key: captures[2].to_string() })
}

pub fn validate_call_id(call_id: &str) -> Result<()> {
	if call_id.is_empty() {
		return Err(Error::Validation { message: "callId must be non-empty.".to_string() });
	}
	if call_id.len() > MAX_CALL_ID_LEN {
		return Err(Error::Validation {
			message: format!("callId exceeds {MAX_CALL_ID_LEN} characters."),
		});
	}

	Ok(())
}

pub fn validate_storage_uri(uri: &str) -> Result<()> {
	if !is_valid_storage_uri(uri) {
		return Err(Error::Validation { message: format!("Malformed audio URI {uri:?}.") });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_bucket_and_key() {
		assert!(is_valid_storage_uri("s3://in-bucket/call-42/audio.wav"));
		assert!(is_valid_storage_uri("s3://in.bucket/deep/path"));
	}

	#[test]
	fn accepts_bare_bucket() {
		assert!(is_valid_storage_uri("s3://in-bucket"));
	}

	#[test]
	fn rejects_foreign_schemes_and_bad_buckets() {
		assert!(!is_valid_storage_uri("https://in-bucket/key"));
		assert!(!is_valid_storage_uri("s3://IN-BUCKET/key"));
		assert!(!is_valid_storage_uri("s3://x/key"));
		assert!(!is_valid_storage_uri(""));
	}

	#[test]
	fn parses_bucket_and_key() {
		let location = parse_storage_uri("s3://in-bucket/call-42/audio.wav")
			.expect("URI with key must parse.");

		assert_eq!(location.bucket, "in-bucket");
		assert_eq!(location.key, "call-42/audio.wav");
	}

	#[test]
	fn parse_requires_key() {
		assert_eq!(parse_storage_uri("s3://in-bucket"), None);
	}

	#[test]
	fn call_id_bounds() {
		assert!(validate_call_id("call-42").is_ok());
		assert!(validate_call_id("").is_err());
		assert!(validate_call_id(&"x".repeat(255)).is_ok());
		assert!(validate_call_id(&"x".repeat(256)).is_err());
	}
}
