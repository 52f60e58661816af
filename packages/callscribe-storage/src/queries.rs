use sqlx::QueryBuilder;

use crate::{
	Result,
	db::Db,
	models::{CallRecord, RecordKey, RecordPage},
};

const COLUMNS: &str = "\
hash, epoch_timestamp, call_id, s3_input_uri, s3_output_uri, bedrock_invocation_arn, \
bedrock_status, call_summary, call_categories, topics, transcript, audio_summary, \
topic_summary, created_at, updated_at";

/// Upsert one record under its `(hash, epoch_timestamp)` composite key.
/// Re-delivery lands under a fresh timestamp, so a conflict only occurs for
/// a same-millisecond replay of the same call, which overwrites in place.
pub async fn put_record(db: &Db, table: &str, record: &CallRecord) -> Result<()> {
	let sql = format!(
		"\
INSERT INTO {table} ({COLUMNS})
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
ON CONFLICT (hash, epoch_timestamp) DO UPDATE SET
	call_id = EXCLUDED.call_id,
	s3_input_uri = EXCLUDED.s3_input_uri,
	s3_output_uri = EXCLUDED.s3_output_uri,
	bedrock_invocation_arn = EXCLUDED.bedrock_invocation_arn,
	bedrock_status = EXCLUDED.bedrock_status,
	call_summary = EXCLUDED.call_summary,
	call_categories = EXCLUDED.call_categories,
	topics = EXCLUDED.topics,
	transcript = EXCLUDED.transcript,
	audio_summary = EXCLUDED.audio_summary,
	topic_summary = EXCLUDED.topic_summary,
	updated_at = EXCLUDED.updated_at"
	);

	sqlx::query(&sql)
		.bind(&record.hash)
		.bind(record.epoch_timestamp)
		.bind(&record.call_id)
		.bind(&record.s3_input_uri)
		.bind(&record.s3_output_uri)
		.bind(&record.bedrock_invocation_arn)
		.bind(&record.bedrock_status)
		.bind(&record.call_summary)
		.bind(&record.call_categories)
		.bind(&record.topics)
		.bind(&record.transcript)
		.bind(&record.audio_summary)
		.bind(&record.topic_summary)
		.bind(record.created_at)
		.bind(record.updated_at)
		.execute(&db.pool)
		.await?;

	Ok(())
}

/// Page through one correlation key, most recent first. Fetches one row
/// past the limit to decide whether a resume marker exists.
pub async fn query_by_hash(
	db: &Db,
	table: &str,
	hash: &str,
	limit: u32,
	start: Option<&RecordKey>,
) -> Result<RecordPage> {
	let mut builder =
		QueryBuilder::new(format!("SELECT {COLUMNS} FROM {table} WHERE hash = "));

	builder.push_bind(hash);

	if let Some(start) = start {
		builder.push(" AND epoch_timestamp < ");
		builder.push_bind(start.epoch_timestamp);
	}

	builder.push(" ORDER BY epoch_timestamp DESC LIMIT ");
	builder.push_bind(limit as i64 + 1);

	let rows: Vec<CallRecord> = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(RecordPage::from_rows(rows, limit as usize))
}

/// Unscoped listing in store-native `(hash, epoch_timestamp)` order.
pub async fn scan_records(
	db: &Db,
	table: &str,
	limit: u32,
	start: Option<&RecordKey>,
) -> Result<RecordPage> {
	let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM {table}"));

	if let Some(start) = start {
		builder.push(" WHERE (hash, epoch_timestamp) > (");
		builder.push_bind(&start.hash);
		builder.push(", ");
		builder.push_bind(start.epoch_timestamp);
		builder.push(")");
	}

	builder.push(" ORDER BY hash, epoch_timestamp LIMIT ");
	builder.push_bind(limit as i64 + 1);

	let rows: Vec<CallRecord> = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(RecordPage::from_rows(rows, limit as usize))
}
