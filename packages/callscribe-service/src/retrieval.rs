use serde::Serialize;
use time::OffsetDateTime;

use callscribe_domain::hash::correlation_key;
use callscribe_storage::models::CallRecord;

use crate::{CallscribeService, Error, Result, cursor};

/// Raw query inputs as the HTTP surface received them. Page size stays a
/// string here so out-of-range and non-numeric values can fall back to the
/// configured default instead of erroring.
#[derive(Debug, Clone, Default)]
pub struct RetrievalRequest {
	pub hash: Option<String>,
	pub call_id: Option<String>,
	pub page_size: Option<String>,
	pub next_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RetrievalResponse {
	pub message: String,
	pub count: usize,
	pub items: Vec<RecordView>,
	pub pagination: PaginationBlock,
}

#[derive(Debug, Serialize)]
pub struct PaginationBlock {
	#[serde(rename = "pageSize")]
	pub page_size: u32,
	#[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
	pub next_token: Option<String>,
	#[serde(rename = "hasMore")]
	pub has_more: bool,
}

/// One record as the query surface presents it.
#[derive(Debug, Serialize)]
pub struct RecordView {
	pub hash: String,
	#[serde(rename = "epochTimestamp")]
	pub epoch_timestamp: i64,
	pub call_id: String,
	pub s3_input_uri: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub s3_output_uri: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bedrock_invocation_arn: Option<String>,
	pub bedrock_status: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub call_summary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub call_categories: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub topics: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transcript: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub audio_summary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub topic_summary: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

impl From<CallRecord> for RecordView {
	fn from(record: CallRecord) -> Self {
		Self {
			hash: record.hash,
			epoch_timestamp: record.epoch_timestamp,
			call_id: record.call_id,
			s3_input_uri: record.s3_input_uri,
			s3_output_uri: record.s3_output_uri,
			bedrock_invocation_arn: record.bedrock_invocation_arn,
			bedrock_status: record.bedrock_status,
			call_summary: record.call_summary,
			call_categories: record.call_categories,
			topics: record.topics,
			transcript: record.transcript,
			audio_summary: record.audio_summary,
			topic_summary: record.topic_summary,
			created_at: record.created_at,
			updated_at: record.updated_at,
		}
	}
}

impl CallscribeService {
	/// Answer one retrieval query. An explicit hash wins over a call
	/// identifier; a call identifier is digested into the same correlation
	/// key the persistence stage writes under; neither means an unscoped
	/// listing.
	pub async fn retrieve(&self, req: RetrievalRequest) -> Result<RetrievalResponse> {
		let page_size = effective_page_size(req.page_size.as_deref(), &self.cfg.pagination);
		let hash = req.hash.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let call_id = req.call_id.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let searched_hash = match (hash, call_id) {
			(Some(hash), _) => Some(hash.to_string()),
			(None, Some(call_id)) => Some(correlation_key(call_id)),
			(None, None) => None,
		};
		let start = match req.next_token.as_deref() {
			Some(token) => Some(cursor::decode(token, searched_hash.as_deref())?),
			None => None,
		};

		let page = match searched_hash.as_deref() {
			Some(hash) => self.store.query_by_hash(hash, page_size, start.as_ref()).await?,
			None => self.store.scan(page_size, start.as_ref()).await?,
		};

		if let Some(searched_hash) = &searched_hash
			&& page.items.is_empty()
		{
			return Err(Error::NotFound { searched_hash: searched_hash.clone() });
		}

		// Continuation is decided by the marker alone; a token that fails
		// to encode suppresses nextToken but never hasMore.
		let has_more = page.resume.is_some();
		let next_token = page
			.resume
			.as_ref()
			.and_then(|marker| cursor::encode(searched_hash.as_deref(), marker).ok());
		let items: Vec<RecordView> = page.items.into_iter().map(RecordView::from).collect();
		let message = if searched_hash.is_some() {
			"Call recording analytics retrieved successfully"
		} else {
			"Recent call recordings retrieved successfully"
		};

		tracing::info!(count = items.len(), has_more, "Retrieval query completed.");

		Ok(RetrievalResponse {
			message: message.to_string(),
			count: items.len(),
			items,
			pagination: PaginationBlock { page_size, next_token, has_more },
		})
	}
}

/// Clamp a raw page-size input to `(0, max]`, falling back to the default
/// for anything unparsable or out of range.
pub fn effective_page_size(raw: Option<&str>, cfg: &callscribe_config::Pagination) -> u32 {
	match raw.and_then(|value| value.trim().parse::<u32>().ok()) {
		Some(parsed) if parsed > 0 => parsed.min(cfg.max_page_size),
		_ => cfg.default_page_size,
	}
}
