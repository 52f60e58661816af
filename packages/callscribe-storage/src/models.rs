use time::OffsetDateTime;

/// One persisted analytics record. Records are append-only: every
/// persistence run writes under a fresh timestamp and nothing is mutated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CallRecord {
	pub hash: String,
	pub epoch_timestamp: i64,
	pub call_id: String,
	pub s3_input_uri: String,
	pub s3_output_uri: Option<String>,
	pub bedrock_invocation_arn: Option<String>,
	pub bedrock_status: String,
	pub call_summary: Option<String>,
	pub call_categories: Option<Vec<String>>,
	pub topics: Option<Vec<String>>,
	pub transcript: Option<String>,
	pub audio_summary: Option<String>,
	pub topic_summary: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

impl CallRecord {
	pub fn key(&self) -> RecordKey {
		RecordKey { hash: self.hash.clone(), epoch_timestamp: self.epoch_timestamp }
	}
}

/// The store-native resume marker: the composite key of the last row a page
/// returned. Serialized field names match the stored schema's wire names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordKey {
	pub hash: String,
	#[serde(rename = "epochTimestamp")]
	pub epoch_timestamp: i64,
}

/// One page of records plus the marker to resume from, when more rows
/// remain past the requested limit.
#[derive(Debug, Default)]
pub struct RecordPage {
	pub items: Vec<CallRecord>,
	pub resume: Option<RecordKey>,
}

impl RecordPage {
	/// Build a page from a limit-plus-one fetch: an overflow row proves
	/// more data exists, and the marker points at the last row kept.
	pub fn from_rows(mut rows: Vec<CallRecord>, limit: usize) -> Self {
		if rows.len() <= limit {
			return Self { items: rows, resume: None };
		}

		rows.truncate(limit);

		let resume = rows.last().map(CallRecord::key);

		Self { items: rows, resume }
	}
}
