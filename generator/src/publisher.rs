use rdkafka::client::ClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::message::Message;
use rdkafka::producer::{BaseProducer, BaseRecord, DeliveryResult, ProducerContext};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::GeneratorError;

pub const BOOTSTRAP_SERVERS: &str = "localhost:9092";

/// The slice of a broker client the feed needs.
///
/// `publish` only enqueues locally and must return without waiting for the
/// broker. Outcomes are reported later, from inside `poll`.
pub trait Publisher {
    fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), GeneratorError>;

    /// Serves pending delivery callbacks without blocking.
    fn poll(&self);
}

impl<T: Publisher + ?Sized> Publisher for &T {
    fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), GeneratorError> {
        (**self).publish(topic, key, payload)
    }

    fn poll(&self) {
        (**self).poll()
    }
}

/// Producer context whose delivery callback only logs the outcome.
pub struct DeliveryLogger;

impl ClientContext for DeliveryLogger {}

impl ProducerContext for DeliveryLogger {
    type DeliveryOpaque = ();

    fn delivery(&self, result: &DeliveryResult<'_>, _: Self::DeliveryOpaque) {
        match result {
            Ok(message) => {
                info!(
                    "Message delivered to {} [{}] at offset {}",
                    message.topic(),
                    message.partition(),
                    message.offset()
                );
            }
            Err((kafka_error, message)) => {
                warn!(
                    "Message delivery to {} failed: {}",
                    message.topic(),
                    kafka_error
                );
            }
        }
    }
}

pub struct KafkaPublisher {
    producer: BaseProducer<DeliveryLogger>,
}

impl KafkaPublisher {
    pub fn new(bootstrap_servers: &str) -> Result<Self, GeneratorError> {
        let producer = client_config(bootstrap_servers).create_with_context(DeliveryLogger)?;

        Ok(Self { producer })
    }
}

/// Only the broker address is set; timeouts and queue limits stay at the
/// librdkafka defaults.
fn client_config(bootstrap_servers: &str) -> ClientConfig {
    let mut config = ClientConfig::new();
    config.set("bootstrap.servers", bootstrap_servers);
    config
}

impl Publisher for KafkaPublisher {
    fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), GeneratorError> {
        let record = BaseRecord::to(topic).key(key).payload(payload);

        self.producer
            .send(record)
            .map_err(|(kafka_error, _)| classify(kafka_error))
    }

    fn poll(&self) {
        self.producer.poll(Duration::ZERO);
    }
}

/// Separates the transient full-queue condition from every other enqueue failure.
fn classify(kafka_error: KafkaError) -> GeneratorError {
    match kafka_error {
        KafkaError::MessageProduction(RDKafkaErrorCode::QueueFull) => GeneratorError::QueueFull,
        other => GeneratorError::Kafka(other),
    }
}
