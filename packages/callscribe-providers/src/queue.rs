//! Queue-transport client. The transport is at-least-once: a message stays
//! visible for redelivery until it is acknowledged.
//!
//! Wire contract: `POST {queue_url}/receive` with
//! `{"maxMessages": n, "waitSeconds": s}` answers
//! `{"messages": [{"messageId", "receipt", "body"}]}`;
//! `POST {queue_url}/ack` with `{"receipt": r}` removes one message.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

const ACK_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
	pub message_id: String,
	pub receipt: String,
	pub body: String,
}

pub async fn receive(
	cfg: &callscribe_config::Queues,
	queue_url: &str,
) -> Result<Vec<QueueMessage>> {
	// Leave headroom past the long-poll window before the client gives up.
	let timeout = Duration::from_secs(cfg.wait_seconds as u64 + 5);
	let client = Client::builder().timeout(timeout).build()?;
	let request = serde_json::json!({
		"maxMessages": cfg.max_messages,
		"waitSeconds": cfg.wait_seconds,
	});
	let res = client.post(format!("{queue_url}/receive")).json(&request).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_receive_response(json)
}

pub async fn acknowledge(queue_url: &str, receipt: &str) -> Result<()> {
	let client = Client::builder().timeout(Duration::from_millis(ACK_TIMEOUT_MS)).build()?;
	let request = serde_json::json!({ "receipt": receipt });

	client
		.post(format!("{queue_url}/ack"))
		.json(&request)
		.send()
		.await?
		.error_for_status()?;

	Ok(())
}

fn parse_receive_response(json: Value) -> Result<Vec<QueueMessage>> {
	let messages = json.get("messages").and_then(Value::as_array).ok_or_else(|| {
		Error::InvalidResponse { message: "Receive response is missing messages array.".to_string() }
	})?;

	messages
		.iter()
		.map(|message| serde_json::from_value(message.clone()).map_err(Error::from))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_messages_with_receipts() {
		let json = serde_json::json!({
			"messages": [
				{ "messageId": "m-1", "receipt": "r-1", "body": "{}" },
				{ "messageId": "m-2", "receipt": "r-2", "body": "{}" }
			]
		});
		let messages = parse_receive_response(json).expect("Response must parse.");

		assert_eq!(messages.len(), 2);
		assert_eq!(messages[1].receipt, "r-2");
	}

	#[test]
	fn rejects_response_without_messages() {
		assert!(parse_receive_response(serde_json::json!({ "ok": true })).is_err());
	}
}
