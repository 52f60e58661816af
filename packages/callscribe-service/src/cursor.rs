//! Opaque pagination tokens. A token is the base64 of a JSON payload
//! carrying the store's resume marker plus the scope (correlation key, if
//! any) of the query that produced it; a token presented against a
//! different scope is foreign and rejected the same way as a corrupt one.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use callscribe_storage::models::RecordKey;

use crate::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CursorPayload {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	hash: Option<String>,
	last: RecordKey,
}

pub fn encode(scope: Option<&str>, marker: &RecordKey) -> Result<String, serde_json::Error> {
	let payload = CursorPayload { hash: scope.map(str::to_string), last: marker.clone() };
	let json = serde_json::to_vec(&payload)?;

	Ok(STANDARD.encode(json))
}

pub fn decode(token: &str, scope: Option<&str>) -> Result<RecordKey> {
	let json = STANDARD.decode(token).map_err(|err| Error::CursorDecode {
		message: format!("Token is not valid base64: {err}."),
	})?;
	let payload: CursorPayload = serde_json::from_slice(&json).map_err(|err| {
		Error::CursorDecode { message: format!("Token payload is not a resume marker: {err}.") }
	})?;

	if payload.hash.as_deref() != scope {
		return Err(Error::CursorDecode {
			message: "Token does not belong to this query.".to_string(),
		});
	}

	Ok(payload.last)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn marker() -> RecordKey {
		RecordKey { hash: "abc123".to_string(), epoch_timestamp: 1_736_000_000_000 }
	}

	#[test]
	fn keyed_round_trip() {
		let token = encode(Some("abc123"), &marker()).expect("Marker must encode.");
		let decoded = decode(&token, Some("abc123")).expect("Token must decode.");

		assert_eq!(decoded, marker());
	}

	#[test]
	fn unscoped_round_trip() {
		let token = encode(None, &marker()).expect("Marker must encode.");
		let decoded = decode(&token, None).expect("Token must decode.");

		assert_eq!(decoded, marker());
	}

	#[test]
	fn corrupt_base64_is_rejected() {
		let mut token = encode(None, &marker()).expect("Marker must encode.");

		token.insert(3, '!');

		assert!(matches!(decode(&token, None), Err(Error::CursorDecode { .. })));
	}

	#[test]
	fn valid_base64_of_garbage_is_rejected() {
		let token = STANDARD.encode(b"not a marker");

		assert!(matches!(decode(&token, None), Err(Error::CursorDecode { .. })));
	}

	#[test]
	fn foreign_scope_is_rejected() {
		let token = encode(Some("abc123"), &marker()).expect("Marker must encode.");

		assert!(matches!(decode(&token, Some("fff000")), Err(Error::CursorDecode { .. })));
		assert!(matches!(decode(&token, None), Err(Error::CursorDecode { .. })));
	}

	#[test]
	fn unscoped_token_is_foreign_to_keyed_query() {
		let token = encode(None, &marker()).expect("Marker must encode.");

		assert!(matches!(decode(&token, Some("abc123")), Err(Error::CursorDecode { .. })));
	}
}
