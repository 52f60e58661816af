use std::time::Duration;

use reqwest::Client;

use crate::Result;

/// Fetch one object body as text. Result blobs are small JSON documents, so
/// no streaming is done here.
pub async fn fetch_object(
	cfg: &callscribe_config::ObjectStore,
	bucket: &str,
	key: &str,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/{bucket}/{key}", cfg.endpoint);
	let res = client.get(url).send().await?;
	let body = res.error_for_status()?.text().await?;

	Ok(body)
}
