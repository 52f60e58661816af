use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// One asynchronous analysis submission. Field names are the engine's wire
/// contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
	pub client_token: String,
	pub input_configuration: IoConfiguration,
	pub output_configuration: IoConfiguration,
	pub pipeline_configuration: PipelineConfiguration,
	pub profile_ref: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IoConfiguration {
	pub s3_uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfiguration {
	pub project_ref: String,
	pub stage: String,
}

#[derive(Debug, Clone)]
pub struct JobSubmission {
	pub invocation_ref: String,
}

/// Submit one job. The engine runs it asynchronously and writes its result
/// under the request's output location; the returned reference is opaque.
pub async fn submit(
	cfg: &callscribe_config::Engine,
	request: &JobRequest,
) -> Result<JobSubmission> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let res = client.post(&cfg.endpoint).json(request).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_submission_response(json)
}

fn parse_submission_response(json: Value) -> Result<JobSubmission> {
	json.get("invocationArn")
		.and_then(Value::as_str)
		.filter(|arn| !arn.is_empty())
		.map(|arn| JobSubmission { invocation_ref: arn.to_string() })
		.ok_or_else(|| Error::InvalidResponse {
			message: "Submission response is missing invocationArn.".to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_serializes_with_engine_field_names() {
		let request = JobRequest {
			client_token: "token-1".to_string(),
			input_configuration: IoConfiguration {
				s3_uri: "s3://in-bucket/call-42/audio.wav".to_string(),
			},
			output_configuration: IoConfiguration {
				s3_uri: "s3://out-bucket/transcription-outputs/call-42/".to_string(),
			},
			pipeline_configuration: PipelineConfiguration {
				project_ref: "project-1".to_string(),
				stage: "LIVE".to_string(),
			},
			profile_ref: "profile-1".to_string(),
		};
		let json = serde_json::to_value(&request).expect("Request must serialize.");

		assert_eq!(json["clientToken"], "token-1");
		assert_eq!(json["inputConfiguration"]["s3Uri"], "s3://in-bucket/call-42/audio.wav");
		assert_eq!(json["pipelineConfiguration"]["projectRef"], "project-1");
		assert_eq!(json["profileRef"], "profile-1");
	}

	#[test]
	fn parses_invocation_reference() {
		let json = serde_json::json!({ "invocationArn": "ref-123" });
		let submission = parse_submission_response(json).expect("Response must parse.");

		assert_eq!(submission.invocation_ref, "ref-123");
	}

	#[test]
	fn rejects_response_without_reference() {
		assert!(parse_submission_response(serde_json::json!({})).is_err());
		assert!(parse_submission_response(serde_json::json!({ "invocationArn": "" })).is_err());
	}
}
