use std::{sync::Arc, time::Duration};

use color_eyre::Result;
use tokio::time as tokio_time;

use callscribe_providers::queue::{self, QueueMessage};
use callscribe_service::{BoxFuture, CallscribeService};

const POLL_INTERVAL_MS: u64 = 500;

/// Which pipeline stage a channel feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
	Notifications,
	Completions,
}

/// Port over the queue transport, substitutable in tests.
pub trait QueueConsumer
where
	Self: Send + Sync,
{
	fn receive<'a>(
		&'a self,
		cfg: &'a callscribe_config::Queues,
		queue_url: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<Vec<QueueMessage>>>;

	fn acknowledge<'a>(
		&'a self,
		queue_url: &'a str,
		receipt: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<()>>;
}

struct HttpQueue;

impl QueueConsumer for HttpQueue {
	fn receive<'a>(
		&'a self,
		cfg: &'a callscribe_config::Queues,
		queue_url: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<Vec<QueueMessage>>> {
		Box::pin(queue::receive(cfg, queue_url))
	}

	fn acknowledge<'a>(
		&'a self,
		queue_url: &'a str,
		receipt: &'a str,
	) -> BoxFuture<'a, callscribe_providers::Result<()>> {
		Box::pin(queue::acknowledge(queue_url, receipt))
	}
}

pub struct WorkerState {
	pub service: CallscribeService,
	pub queue: Arc<dyn QueueConsumer>,
}
impl WorkerState {
	pub fn new(service: CallscribeService) -> Self {
		Self { service, queue: Arc::new(HttpQueue) }
	}

	pub fn with_queue(service: CallscribeService, queue: Arc<dyn QueueConsumer>) -> Self {
		Self { service, queue }
	}
}

pub async fn run_worker(state: WorkerState) -> Result<()> {
	loop {
		let notifications = match drain_channel(&state, Channel::Notifications).await {
			Ok(processed) => processed,
			Err(err) => {
				tracing::error!(error = %err, "Notification channel poll failed.");

				0
			},
		};
		let completions = match drain_channel(&state, Channel::Completions).await {
			Ok(processed) => processed,
			Err(err) => {
				tracing::error!(error = %err, "Completion channel poll failed.");

				0
			},
		};

		if notifications == 0 && completions == 0 {
			tokio_time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
		}
	}
}

/// Receive one batch and process it strictly in order. A failing message is
/// logged and left unacknowledged so the transport redelivers it; earlier
/// successes in the batch stand.
pub async fn drain_channel(state: &WorkerState, channel: Channel) -> Result<usize> {
	let cfg = &state.service.cfg.queues;
	let queue_url = match channel {
		Channel::Notifications => cfg.notifications_url.as_str(),
		Channel::Completions => cfg.completions_url.as_str(),
	};
	let messages = state.queue.receive(cfg, queue_url).await?;
	let mut processed = 0;

	for message in &messages {
		match handle_message(state, channel, message).await {
			Ok(()) => {
				state.queue.acknowledge(queue_url, &message.receipt).await?;

				processed += 1;
			},
			Err(err) => {
				tracing::error!(
					message_id = %message.message_id,
					error = %err,
					"Message failed; left for redelivery."
				);
			},
		}
	}

	Ok(processed)
}

async fn handle_message(
	state: &WorkerState,
	channel: Channel,
	message: &QueueMessage,
) -> callscribe_service::Result<()> {
	match channel {
		Channel::Notifications => {
			state.service.process_notification(&message.body).await?;
		},
		Channel::Completions => {
			let report = state.service.process_completion(&message.body).await?;

			if report.skipped > 0 {
				tracing::debug!(skipped = report.skipped, "Unrelated storage objects skipped.");
			}
		},
	}

	Ok(())
}
