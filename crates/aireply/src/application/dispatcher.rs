//! Event Dispatcher
//!
//! Fans a webhook batch out to one task per event and waits for all of them.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::application::responder::{ReplyOutcome, ResponseOrchestrator};
use crate::domain::entities::{EventType, WebhookEvent};
use crate::ports::{CompletionClient, ReplyClient};

/// Per-batch outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub received: usize,
    pub ignored: usize,
    pub replied: usize,
    pub fallback_sent: usize,
    pub delivery_failed: usize,
    /// Tasks that panicked or were cancelled
    pub aborted: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: ReplyOutcome) {
        match outcome {
            ReplyOutcome::Ignored => self.ignored += 1,
            ReplyOutcome::Replied => self.replied += 1,
            ReplyOutcome::FallbackSent => self.fallback_sent += 1,
            ReplyOutcome::DeliveryFailed => self.delivery_failed += 1,
        }
    }

    /// Number of reply attempts made
    pub fn replies_attempted(&self) -> usize {
        self.replied + self.fallback_sent + self.delivery_failed
    }
}

/// Routes `message` events to the orchestrator
pub struct EventDispatcher<C: CompletionClient, R: ReplyClient> {
    orchestrator: Arc<ResponseOrchestrator<C, R>>,
}

impl<C, R> EventDispatcher<C, R>
where
    C: CompletionClient + 'static,
    R: ReplyClient + 'static,
{
    pub fn new(orchestrator: Arc<ResponseOrchestrator<C, R>>) -> Self {
        Self { orchestrator }
    }

    /// Process a batch, one task per event.
    ///
    /// Returns once every event has been handled. A failing or panicking
    /// event does not affect its siblings.
    pub async fn dispatch(&self, events: Vec<WebhookEvent>) -> DispatchSummary {
        let mut summary = DispatchSummary {
            received: events.len(),
            ..DispatchSummary::default()
        };
        let mut tasks = JoinSet::new();

        for event in events {
            let WebhookEvent {
                event_type,
                reply_token,
                message,
                ..
            } = event;

            let message = match (event_type, message) {
                (EventType::Message, Some(message)) => message,
                (event_type, _) => {
                    debug!(event_type = ?event_type, "Skipping non-message event");
                    summary.ignored += 1;
                    continue;
                }
            };

            let orchestrator = Arc::clone(&self.orchestrator);
            tasks.spawn(async move {
                orchestrator
                    .handle_message(&message, reply_token.as_deref())
                    .await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!(error = %e, "Event task aborted");
                    summary.aborted += 1;
                }
            }
        }

        info!(
            received = %summary.received,
            replied = %summary.replied,
            fallback_sent = %summary.fallback_sent,
            delivery_failed = %summary.delivery_failed,
            ignored = %summary.ignored,
            aborted = %summary.aborted,
            "Webhook batch dispatched"
        );

        summary
    }
}
