use crate::{Error, Result};

/// Fixed file name the analytics engine writes its normalized output under.
pub const RESULT_FILE_SUFFIX: &str = "result.json";

/// Undo the object-store notification encoding: `+` stands for a space and
/// the rest is percent-encoded.
pub fn normalize_object_key(raw: &str) -> Result<String> {
	let plussed = raw.replace('+', " ");

	urlencoding::decode(&plussed)
		.map(|decoded| decoded.into_owned())
		.map_err(|err| Error::Validation { message: format!("Undecodable storage key: {err}.") })
}

/// Completion notifications share their channel with unrelated storage
/// activity; only keys ending in the result-file name belong to this
/// pipeline.
pub fn is_result_key(key: &str) -> bool {
	key.ends_with(RESULT_FILE_SUFFIX)
}

/// Recover the business identifier from a result key. Output objects are
/// laid out as `{prefix}/{callId}/...`, so the identifier is the segment
/// after the prefix.
pub fn call_id_from_key(key: &str) -> Result<&str> {
	let mut segments = key.split('/');
	let _prefix = segments.next();

	match segments.next() {
		Some(call_id) if !call_id.is_empty() =>
			if segments.next().is_some() {
				Ok(call_id)
			} else {
				Err(Error::Extraction { key: key.to_string() })
			},
		_ => Err(Error::Extraction { key: key.to_string() }),
	}
}
