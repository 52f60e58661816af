//! Test doubles shared across the workspace. The in-memory store mirrors
//! the PostgreSQL implementation's paging contract exactly: limit-plus-one
//! fetches, descending-timestamp keyed queries, `(hash, epoch_timestamp)`
//! scan order.

use std::sync::Mutex;

use time::OffsetDateTime;

use callscribe_storage::{
	BoxFuture, RecordStore, Result,
	models::{CallRecord, RecordKey, RecordPage},
};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	rows: Mutex<Vec<CallRecord>>,
}
impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn seed(&self, records: impl IntoIterator<Item = CallRecord>) {
		let mut rows = self.lock();

		rows.extend(records);
	}

	pub fn snapshot(&self) -> Vec<CallRecord> {
		self.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CallRecord>> {
		self.rows.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl RecordStore for MemoryRecordStore {
	fn put<'a>(&'a self, record: &'a CallRecord) -> BoxFuture<'a, Result<()>> {
		let mut rows = self.lock();

		match rows.iter_mut().find(|row| {
			row.hash == record.hash && row.epoch_timestamp == record.epoch_timestamp
		}) {
			Some(row) => *row = record.clone(),
			None => rows.push(record.clone()),
		}

		Box::pin(async { Ok(()) })
	}

	fn query_by_hash<'a>(
		&'a self,
		hash: &'a str,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>> {
		let mut matched: Vec<CallRecord> = self
			.lock()
			.iter()
			.filter(|row| row.hash == hash)
			.filter(|row| start.is_none_or(|key| row.epoch_timestamp < key.epoch_timestamp))
			.cloned()
			.collect();

		matched.sort_by(|a, b| b.epoch_timestamp.cmp(&a.epoch_timestamp));
		matched.truncate(limit as usize + 1);

		let page = RecordPage::from_rows(matched, limit as usize);

		Box::pin(async { Ok(page) })
	}

	fn scan<'a>(
		&'a self,
		limit: u32,
		start: Option<&'a RecordKey>,
	) -> BoxFuture<'a, Result<RecordPage>> {
		let mut matched: Vec<CallRecord> = self
			.lock()
			.iter()
			.filter(|row| {
				start.is_none_or(|key| {
					(row.hash.as_str(), row.epoch_timestamp)
						> (key.hash.as_str(), key.epoch_timestamp)
				})
			})
			.cloned()
			.collect();

		matched.sort_by(|a, b| {
			(a.hash.as_str(), a.epoch_timestamp).cmp(&(b.hash.as_str(), b.epoch_timestamp))
		});
		matched.truncate(limit as usize + 1);

		let page = RecordPage::from_rows(matched, limit as usize);

		Box::pin(async { Ok(page) })
	}
}

/// A fully-populated record for seeding stores in tests.
pub fn sample_record(hash: &str, call_id: &str, epoch_timestamp: i64) -> CallRecord {
	let written_at = OffsetDateTime::from_unix_timestamp(epoch_timestamp / 1_000)
		.unwrap_or(OffsetDateTime::UNIX_EPOCH);

	CallRecord {
		hash: hash.to_string(),
		epoch_timestamp,
		call_id: call_id.to_string(),
		s3_input_uri: format!("s3://call-audio-in/{call_id}"),
		s3_output_uri: Some(format!("s3://call-analytics-out/{call_id}/")),
		bedrock_invocation_arn: None,
		bedrock_status: "SUCCESS".to_string(),
		call_summary: Some("Customer called about an invoice.".to_string()),
		call_categories: Some(vec!["billing".to_string()]),
		topics: Some(vec!["invoice".to_string()]),
		transcript: None,
		audio_summary: None,
		topic_summary: None,
		created_at: written_at,
		updated_at: written_at,
	}
}
