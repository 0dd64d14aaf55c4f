use rand::rngs::StdRng;
use rand::SeedableRng;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use transaction_generator::catalog::{CURRENCIES, PAYMENT_METHODS, PAYMENT_STATUSES};
use transaction_generator::{Feed, FeedConfig, GeneratorError, Publisher, Transaction};

enum Outcome {
    QueueFull,
    Broken,
    Unencodable,
}

struct Sent {
    topic: String,
    key: String,
    payload: String,
}

/// In-memory publisher that fails according to a script, then accepts everything.
#[derive(Default)]
struct ScriptedPublisher {
    script: Mutex<VecDeque<Outcome>>,
    attempts: Mutex<Vec<Instant>>,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedPublisher {
    fn failing_with(outcomes: Vec<Outcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Publisher for ScriptedPublisher {
    fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), GeneratorError> {
        self.attempts.lock().unwrap().push(Instant::now());

        match self.script.lock().unwrap().pop_front() {
            Some(Outcome::QueueFull) => Err(GeneratorError::QueueFull),
            Some(Outcome::Broken) => Err(GeneratorError::Kafka(KafkaError::MessageProduction(
                RDKafkaErrorCode::MessageSizeTooLarge,
            ))),
            Some(Outcome::Unencodable) => Err(GeneratorError::Serialization(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            )),
            None => {
                self.sent.lock().unwrap().push(Sent {
                    topic: topic.to_string(),
                    key: key.to_string(),
                    payload: payload.to_string(),
                });
                Ok(())
            }
        }
    }

    fn poll(&self) {}
}

fn config(run_for: Duration) -> FeedConfig {
    FeedConfig {
        run_for,
        ..FeedConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_three_attempts_in_eleven_seconds() {
    let publisher = ScriptedPublisher::default();
    let mut feed = Feed::new(
        config(Duration::from_secs(11)),
        &publisher,
        StdRng::seed_from_u64(42),
    );

    let started = Instant::now();
    let summary = feed.run().await;

    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.enqueued, 3);

    let offsets: Vec<u64> = publisher
        .attempt_times()
        .iter()
        .map(|t| t.duration_since(started).as_secs())
        .collect();
    assert_eq!(offsets, vec![0, 5, 10]);
}

#[tokio::test(start_paused = true)]
async fn test_full_queue_backs_off_then_sends() {
    let publisher = ScriptedPublisher::failing_with(vec![Outcome::QueueFull]);
    let mut feed = Feed::new(
        config(Duration::from_secs(5)),
        &publisher,
        StdRng::seed_from_u64(7),
    );

    let summary = feed.run().await;

    assert_eq!(summary.attempts, 2);
    assert_eq!(summary.queue_full, 1);
    assert_eq!(summary.enqueued, 1);

    let times = publisher.attempt_times();
    let gap = times[1].duration_since(times[0]);
    assert!(gap >= Duration::from_secs(1) && gap < Duration::from_secs(2));
    assert_eq!(publisher.sent.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_other_errors_do_not_stop_the_feed() {
    let publisher = ScriptedPublisher::failing_with(vec![Outcome::Broken]);
    let mut feed = Feed::new(
        config(Duration::from_secs(6)),
        &publisher,
        StdRng::seed_from_u64(3),
    );

    let started = Instant::now();
    let summary = feed.run().await;

    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.enqueued, 2);
    assert_eq!(publisher.sent.lock().unwrap().len(), 2);

    // the failed record is replaced straight away, without waiting the interval
    let offsets: Vec<u64> = publisher
        .attempt_times()
        .iter()
        .map(|t| t.duration_since(started).as_secs())
        .collect();
    assert_eq!(offsets, vec![0, 0, 5]);
}

#[tokio::test(start_paused = true)]
async fn test_consecutive_errors_retry_immediately() {
    let publisher = ScriptedPublisher::failing_with(vec![Outcome::Unencodable, Outcome::Broken]);
    let mut feed = Feed::new(
        config(Duration::from_secs(1)),
        &publisher,
        StdRng::seed_from_u64(9),
    );

    let summary = feed.run().await;

    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.enqueued, 1);
}

#[tokio::test(start_paused = true)]
async fn test_published_messages_match_their_keys() {
    let publisher = ScriptedPublisher::default();
    let mut feed = Feed::new(
        config(Duration::from_secs(30)),
        &publisher,
        StdRng::seed_from_u64(11),
    );

    feed.run().await;

    let sent = publisher.sent.lock().unwrap();
    assert_eq!(sent.len(), 6);

    for message in sent.iter() {
        assert_eq!(message.topic, "financial_transactions");

        let transaction = Transaction::from_json(&message.payload).unwrap();
        assert_eq!(message.key, transaction.transaction_id);
        assert!(CURRENCIES.contains(&transaction.currency.as_str()));
        assert!(PAYMENT_METHODS.contains(&transaction.payment_method.as_str()));
        assert!(PAYMENT_STATUSES.contains(&transaction.payment_status.as_str()));
        assert_eq!(
            transaction.total_amount,
            ((transaction.product_price * transaction.product_quantity as f64) * 100.0).round()
                / 100.0
        );
    }
}
