use uuid::Uuid;

use callscribe_domain::envelope;
use callscribe_providers::job_engine::{IoConfiguration, JobRequest, PipelineConfiguration};

use crate::{CallscribeService, Result};

/// What one accepted notification turned into.
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
	pub call_id: String,
	pub invocation_ref: String,
	pub output_uri: String,
	pub client_token: String,
}

impl CallscribeService {
	/// Handle one inbound-notification delivery: unwrap, validate, derive
	/// the output location, and submit an analysis job. Any failure
	/// propagates so the transport redelivers the message.
	pub async fn process_notification(&self, body: &str) -> Result<InvocationOutcome> {
		let notification = envelope::decode_notification(body)?;
		let output_uri = format!(
			"s3://{}/{}/{}/",
			self.cfg.object_store.output_bucket,
			self.cfg.object_store.output_prefix,
			notification.call_id,
		);
		// A fresh token per delivery, never derived from the identifier:
		// duplicate deliveries become duplicate submissions, and the
		// hash-keyed write downstream is what converges them.
		let client_token = Uuid::new_v4().to_string();
		let request = JobRequest {
			client_token: client_token.clone(),
			input_configuration: IoConfiguration { s3_uri: notification.audio_s3_uri.clone() },
			output_configuration: IoConfiguration { s3_uri: output_uri.clone() },
			pipeline_configuration: PipelineConfiguration {
				project_ref: self.cfg.engine.project_ref.clone(),
				stage: self.cfg.engine.stage.clone(),
			},
			profile_ref: self.cfg.engine.profile_ref.clone(),
		};
		let submission = self.collaborators.engine.submit(&self.cfg.engine, &request).await?;

		tracing::info!(
			call_id = %notification.call_id,
			invocation_ref = %submission.invocation_ref,
			output_uri = %output_uri,
			"Analysis job submitted."
		);

		Ok(InvocationOutcome {
			call_id: notification.call_id,
			invocation_ref: submission.invocation_ref,
			output_uri,
			client_token,
		})
	}
}
