/// Render the record table and its supporting index for the configured
/// table name. The table name is validated at config load.
pub fn render_schema(table: &str) -> String {
	format!(
		"\
CREATE TABLE IF NOT EXISTS {table} (
	hash TEXT NOT NULL,
	epoch_timestamp BIGINT NOT NULL,
	call_id TEXT NOT NULL,
	s3_input_uri TEXT NOT NULL,
	s3_output_uri TEXT,
	bedrock_invocation_arn TEXT,
	bedrock_status TEXT NOT NULL,
	call_summary TEXT,
	call_categories TEXT[],
	topics TEXT[],
	transcript TEXT,
	audio_summary TEXT,
	topic_summary TEXT,
	created_at TIMESTAMPTZ NOT NULL,
	updated_at TIMESTAMPTZ NOT NULL,
	PRIMARY KEY (hash, epoch_timestamp)
);
CREATE INDEX IF NOT EXISTS {table}_call_id_idx ON {table} (call_id)"
	)
}
