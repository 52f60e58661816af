//! Unwrapping for the two queue channels. Either channel may deliver its
//! payload directly, or wrapped one level deeper as a JSON string inside a
//! `Message` field. The shape is resolved by an explicit detection step
//! before any field is trusted.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
	Error, Result,
	location::{validate_call_id, validate_storage_uri},
};

/// A request to analyze one recorded call.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundNotification {
	#[serde(rename = "callId")]
	pub call_id: String,
	#[serde(rename = "audioS3Uri")]
	pub audio_s3_uri: String,
	#[serde(default)]
	pub timestamp: Option<String>,
	#[serde(default)]
	pub metadata: Option<Map<String, Value>>,
}

/// One object-created event from the completion channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreated {
	pub bucket: String,
	pub key: String,
	pub size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
	#[serde(rename = "Records", default)]
	records: Vec<CompletionRecord>,
}

#[derive(Debug, Deserialize)]
struct CompletionRecord {
	s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
	bucket: BucketEntity,
	object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
	name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
	key: String,
	#[serde(default)]
	size: Option<u64>,
}

/// How a delivered body carries its payload.
#[derive(Debug)]
enum Delivery {
	Direct(Value),
	Wrapped(Value),
}

impl Delivery {
	fn into_payload(self) -> Value {
		match self {
			Self::Direct(value) | Self::Wrapped(value) => value,
		}
	}
}

/// Resolve the delivery shape of `body`. `marker` is a field the expected
/// payload always carries; its presence selects the direct shape, otherwise
/// a string `Message` field selects the wrapped shape.
fn classify(body: &str, marker: &str) -> Result<Delivery> {
	let outer: Value = serde_json::from_str(body)
		.map_err(|err| Error::EnvelopeShape { message: format!("Body is not JSON: {err}.") })?;

	if outer.get(marker).is_some() {
		return Ok(Delivery::Direct(outer));
	}

	match outer.get("Message") {
		Some(Value::String(inner)) => {
			let payload: Value = serde_json::from_str(inner).map_err(|err| {
				Error::EnvelopeShape { message: format!("Wrapped Message is not JSON: {err}.") }
			})?;

			Ok(Delivery::Wrapped(payload))
		},
		_ => Err(Error::EnvelopeShape {
			message: format!("Neither a {marker} payload nor a wrapped Message."),
		}),
	}
}

/// Unwrap and validate an inbound notification body.
pub fn decode_notification(body: &str) -> Result<InboundNotification> {
	let payload = classify(body, "callId")?.into_payload();
	let notification: InboundNotification = serde_json::from_value(payload)
		.map_err(|err| Error::EnvelopeShape { message: format!("Malformed notification: {err}.") })?;

	validate_call_id(&notification.call_id)?;
	validate_storage_uri(&notification.audio_s3_uri)?;

	Ok(notification)
}

/// Unwrap a completion-event body into its object-created records.
pub fn decode_completion(body: &str) -> Result<Vec<ObjectCreated>> {
	let payload = classify(body, "Records")?.into_payload();
	let envelope: CompletionEnvelope = serde_json::from_value(payload).map_err(|err| {
		Error::EnvelopeShape { message: format!("Malformed completion event: {err}.") }
	})?;

	Ok(envelope
		.records
		.into_iter()
		.map(|record| ObjectCreated {
			bucket: record.s3.bucket.name,
			key: record.s3.object.key,
			size: record.s3.object.size,
		})
		.collect())
}
