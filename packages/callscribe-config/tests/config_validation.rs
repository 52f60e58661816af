use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use callscribe_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = r#"
region = "us-east-1"

[service]
http_bind = "127.0.0.1:8080"
log_level = "info"

[engine]
project_ref = "arn:aws:bedrock:us-east-1:123456789012:data-automation-project/demo"
profile_ref = "arn:aws:bedrock:us-east-1:123456789012:data-automation-profile/demo"
stage       = "LIVE"

[object_store]
input_bucket  = "call-audio-in"
output_bucket = "call-analytics-out"
output_prefix = "transcription-outputs"

[queues]
notifications_url = "https://queue.local/notifications"
completions_url   = "https://queue.local/completions"

[storage]
table = "call_recordings"

[storage.postgres]
dsn            = "postgres://callscribe@localhost/callscribe"
pool_max_conns = 4

[pagination]
default_page_size = 20
max_page_size     = 100
"#;

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("Clock went backwards.")
		.as_nanos();
	let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
	let path = env::temp_dir().join(format!("callscribe_config_{nanos}_{unique}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn load(contents: &str) -> Result<Config, Error> {
	let path = write_temp_config(contents);
	let result = callscribe_config::load(&path);

	fs::remove_file(&path).ok();

	result
}

#[test]
fn loads_sample_config() {
	let cfg = load(SAMPLE_CONFIG_TOML).expect("Sample config must load.");

	assert_eq!(cfg.region, "us-east-1");
	assert_eq!(cfg.pagination.default_page_size, 20);
	assert_eq!(cfg.pagination.max_page_size, 100);
	assert_eq!(cfg.object_store.output_prefix, "transcription-outputs");
}

#[test]
fn derives_endpoints_from_region() {
	let cfg = load(SAMPLE_CONFIG_TOML).expect("Sample config must load.");

	assert_eq!(
		cfg.engine.endpoint,
		"https://bedrock-data-automation-runtime.us-east-1.amazonaws.com"
	);
	assert_eq!(cfg.object_store.endpoint, "https://s3.us-east-1.amazonaws.com");
}

#[test]
fn keeps_explicit_endpoint_but_trims_trailing_slash() {
	let contents =
		SAMPLE_CONFIG_TOML.replace("[engine]", "[engine]\nendpoint = \"http://localhost:9090/\"");
	let cfg = load(&contents).expect("Config with explicit endpoint must load.");

	assert_eq!(cfg.engine.endpoint, "http://localhost:9090");
}

#[test]
fn rejects_unknown_stage() {
	let contents = SAMPLE_CONFIG_TOML.replace("stage       = \"LIVE\"", "stage = \"CANARY\"");
	let err = load(&contents).expect_err("Unknown stage must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_empty_project_ref() {
	let contents = SAMPLE_CONFIG_TOML.replace(
		"project_ref = \"arn:aws:bedrock:us-east-1:123456789012:data-automation-project/demo\"",
		"project_ref = \"\"",
	);
	let err = load(&contents).expect_err("Empty project_ref must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_missing_bucket() {
	let contents = SAMPLE_CONFIG_TOML.replace("input_bucket  = \"call-audio-in\"\n", "");
	let err = load(&contents).expect_err("Missing bucket must be rejected.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}

#[test]
fn rejects_sloppy_output_prefix() {
	let contents = SAMPLE_CONFIG_TOML.replace(
		"output_prefix = \"transcription-outputs\"",
		"output_prefix = \"transcription-outputs/\"",
	);
	let err = load(&contents).expect_err("Trailing slash in prefix must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_max_page_size_below_default() {
	let contents = SAMPLE_CONFIG_TOML.replace("max_page_size     = 100", "max_page_size = 10");
	let err = load(&contents).expect_err("max below default must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_quoted_injection_table_name() {
	let contents = SAMPLE_CONFIG_TOML
		.replace("table = \"call_recordings\"", "table = \"call_recordings; DROP\"");
	let err = load(&contents).expect_err("Table name with punctuation must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}
