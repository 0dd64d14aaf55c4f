//! The timed generate / publish loop.

use chrono::Utc;
use rand::Rng;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use crate::error::GeneratorError;
use crate::publisher::Publisher;
use crate::transaction::Transaction;

pub const TOPIC: &str = "financial_transactions";
pub const RUN_FOR: Duration = Duration::from_secs(120);
pub const SEND_INTERVAL: Duration = Duration::from_secs(5);
pub const QUEUE_FULL_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub topic: String,
    /// Wall-clock ceiling; checked before every iteration.
    pub run_for: Duration,
    pub send_interval: Duration,
    /// Pause after the producer reports a full local queue.
    pub backoff: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            topic: TOPIC.to_string(),
            run_for: RUN_FOR,
            send_interval: SEND_INTERVAL,
            backoff: QUEUE_FULL_BACKOFF,
        }
    }
}

/// Counters for one run of the feed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    pub attempts: u64,
    pub enqueued: u64,
    pub queue_full: u64,
    pub failed: u64,
}

pub struct Feed<P, R> {
    config: FeedConfig,
    publisher: P,
    rng: R,
}

impl<P: Publisher, R: Rng> Feed<P, R> {
    pub fn new(config: FeedConfig, publisher: P, rng: R) -> Self {
        Self {
            config,
            publisher,
            rng,
        }
    }

    /// Generates one transaction and hands it to the publisher.
    ///
    /// Returns as soon as the message is queued; the delivery outcome shows up
    /// in the logs on a later `poll`.
    pub fn send_one(&mut self) -> Result<Transaction, GeneratorError> {
        let transaction = Transaction::generate(&mut self.rng, Utc::now());
        debug!("Generated transaction: {:?}", transaction);

        let payload = transaction.to_json()?;
        self.publisher
            .publish(&self.config.topic, transaction.key(), &payload)?;

        Ok(transaction)
    }

    /// Runs until `run_for` has elapsed, then returns without flushing.
    ///
    /// A failed iteration never ends the run: a full queue waits `backoff`,
    /// any other error moves straight on to the next record. The failed
    /// record is dropped either way.
    pub async fn run(&mut self) -> FeedSummary {
        let start = Instant::now();
        let mut summary = FeedSummary::default();

        info!(
            "Sending to topic {} every {:?} for {:?}",
            self.config.topic, self.config.send_interval, self.config.run_for
        );

        while start.elapsed() < self.config.run_for {
            summary.attempts += 1;

            let result = self.send_one();
            self.publisher.poll();

            match result {
                Ok(transaction) => {
                    summary.enqueued += 1;
                    debug!("Queued transaction {}", transaction.transaction_id);
                    sleep(self.config.send_interval).await;
                }
                Err(GeneratorError::QueueFull) => {
                    summary.queue_full += 1;
                    warn!(
                        "Buffer is full! waiting for {:?}",
                        self.config.backoff
                    );
                    sleep(self.config.backoff).await;
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Error: {}", e);
                }
            }
        }

        info!(
            "Run finished after {:?}: attempts={}, enqueued={}, queue_full={}, failed={}",
            start.elapsed(),
            summary.attempts,
            summary.enqueued,
            summary.queue_full,
            summary.failed
        );

        summary
    }
}
