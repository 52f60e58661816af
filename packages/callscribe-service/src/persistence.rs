use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use callscribe_domain::{envelope, hash::correlation_key, keys};
use callscribe_storage::models::CallRecord;

use crate::{CallscribeService, Error, Result};

/// Status marker written with every persisted record. Failed runs never
/// reach the store, so no failure status is modeled.
pub const SUCCESS_STATUS: &str = "SUCCESS";

#[derive(Debug, Clone)]
pub struct StoredRecord {
	pub hash: String,
	pub call_id: String,
	pub epoch_timestamp: i64,
}

#[derive(Debug, Default)]
pub struct CompletionReport {
	pub stored: Vec<StoredRecord>,
	pub skipped: usize,
}

/// The analytics fields of a result blob. The engine writes them either at
/// the top level or nested under `inference_result`.
#[derive(Debug, Default, Deserialize)]
struct AnalyticsPayload {
	#[serde(default)]
	call_summary: Option<String>,
	#[serde(default)]
	call_categories: Option<Vec<String>>,
	#[serde(default)]
	topics: Option<Vec<String>>,
	#[serde(default)]
	transcript: Option<String>,
	#[serde(default)]
	audio_summary: Option<String>,
	#[serde(default)]
	topic_summary: Option<String>,
}

impl AnalyticsPayload {
	fn is_vacant(&self) -> bool {
		self.call_summary.is_none()
			&& self.call_categories.is_none()
			&& self.topics.is_none()
			&& self.transcript.is_none()
			&& self.audio_summary.is_none()
			&& self.topic_summary.is_none()
	}
}

impl CallscribeService {
	/// Handle one completion-event delivery. Object events are processed
	/// strictly in order; the first failing event fails the whole message
	/// (already-persisted records stand, per at-least-once semantics).
	pub async fn process_completion(&self, body: &str) -> Result<CompletionReport> {
		let events = envelope::decode_completion(body)?;
		let mut report = CompletionReport::default();

		for event in events {
			let key = keys::normalize_object_key(&event.key)?;

			if !keys::is_result_key(&key) {
				tracing::debug!(key = %key, "Skipping unrelated storage object.");

				report.skipped += 1;

				continue;
			}

			let call_id = keys::call_id_from_key(&key)?.to_string();
			let blob = self
				.collaborators
				.objects
				.fetch(&self.cfg.object_store, &event.bucket, &key)
				.await?;

			if blob.trim().is_empty() {
				return Err(Error::EmptyBody { bucket: event.bucket, key });
			}

			let analytics = parse_analytics(&blob)?;
			let now = OffsetDateTime::now_utc();
			let epoch_timestamp = (now.unix_timestamp_nanos() / 1_000_000) as i64;
			let hash = correlation_key(&call_id);
			let record = CallRecord {
				hash: hash.clone(),
				epoch_timestamp,
				call_id: call_id.clone(),
				s3_input_uri: format!("s3://{}/{call_id}", self.cfg.object_store.input_bucket),
				s3_output_uri: Some(format!("s3://{}/{call_id}/", event.bucket)),
				// The originating invocation is unknown in this flow; left
				// absent rather than fabricated.
				bedrock_invocation_arn: None,
				bedrock_status: SUCCESS_STATUS.to_string(),
				call_summary: analytics.call_summary,
				call_categories: analytics.call_categories,
				topics: analytics.topics,
				transcript: analytics.transcript,
				audio_summary: analytics.audio_summary,
				topic_summary: analytics.topic_summary,
				created_at: now,
				updated_at: now,
			};

			self.store.put(&record).await?;

			tracing::info!(hash = %hash, call_id = %call_id, "Persisted analytics record.");

			report.stored.push(StoredRecord { hash, call_id, epoch_timestamp });
		}

		Ok(report)
	}
}

fn parse_analytics(blob: &str) -> Result<AnalyticsPayload> {
	let value: Value = serde_json::from_str(blob)
		.map_err(|err| Error::MalformedResult { message: format!("Result is not JSON: {err}.") })?;
	let payload = match value.get("inference_result") {
		Some(inner) => inner.clone(),
		None => value,
	};

	if !payload.is_object() {
		return Err(Error::MalformedResult {
			message: "Result carries no analytics object.".to_string(),
		});
	}

	let analytics: AnalyticsPayload = serde_json::from_value(payload).map_err(|err| {
		Error::MalformedResult { message: format!("Unreadable analytics fields: {err}.") }
	})?;

	if analytics.is_vacant() {
		return Err(Error::MalformedResult {
			message: "Result carries no analytics fields.".to_string(),
		});
	}

	Ok(analytics)
}
