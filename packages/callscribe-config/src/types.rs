use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub region: String,
	pub service: Service,
	pub engine: Engine,
	pub object_store: ObjectStore,
	pub queues: Queues,
	pub storage: Storage,
	pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Asynchronous analytics job engine. `endpoint` may be left empty in the
/// file and is derived from `region` during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct Engine {
	#[serde(default)]
	pub endpoint: String,
	pub project_ref: String,
	pub profile_ref: String,
	#[serde(default = "default_stage")]
	pub stage: String,
	#[serde(default = "default_engine_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStore {
	#[serde(default)]
	pub endpoint: String,
	pub input_bucket: String,
	pub output_bucket: String,
	#[serde(default = "default_output_prefix")]
	pub output_prefix: String,
	#[serde(default = "default_fetch_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Queues {
	pub notifications_url: String,
	pub completions_url: String,
	#[serde(default = "default_max_messages")]
	pub max_messages: u32,
	#[serde(default = "default_wait_seconds")]
	pub wait_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	#[serde(default = "default_table")]
	pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
	#[serde(default = "default_page_size")]
	pub default_page_size: u32,
	#[serde(default = "default_max_page_size")]
	pub max_page_size: u32,
}

fn default_stage() -> String {
	"LIVE".to_string()
}

fn default_engine_timeout_ms() -> u64 {
	30_000
}

fn default_output_prefix() -> String {
	"transcription-outputs".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
	10_000
}

fn default_max_messages() -> u32 {
	10
}

fn default_wait_seconds() -> u32 {
	10
}

fn default_table() -> String {
	"call_recordings".to_string()
}

fn default_page_size() -> u32 {
	20
}

fn default_max_page_size() -> u32 {
	100
}
