use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use crate::catalog::{
    self, CURRENCIES, PAYMENT_METHODS, PAYMENT_STATUSES, PRODUCT_BRANDS, PRODUCT_CATEGORIES,
    PRODUCT_IDS, PRODUCT_NAMES,
};
use crate::error::GeneratorError;

pub const MIN_PRICE: f64 = 10.0;
pub const MAX_PRICE: f64 = 1000.0;
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;

/// A single synthetic sales transaction, as it goes out on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transaction {
    pub transaction_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_category: String,
    pub product_price: f64,
    pub product_quantity: u32,
    pub product_brand: String,
    pub currency: String,
    pub customer_id: String,
    #[serde(with = "transaction_date")]
    pub transaction_date: DateTime<Utc>,
    pub payment_method: String,
    pub payment_status: String,
    pub total_amount: f64,
}

impl Transaction {
    /// Draws a fresh transaction from `rng`, stamped with `now`.
    ///
    /// Every categorical field is an independent uniform draw from its pool,
    /// so the product id, name and brand do not have to agree with each other.
    /// The returned record is already enriched.
    pub fn generate<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let transaction_id = random_uuid(rng).to_string();

        let mut tx = Self {
            transaction_id,
            product_id: catalog::pick(rng, &PRODUCT_IDS).to_string(),
            product_name: catalog::pick(rng, &PRODUCT_NAMES).to_string(),
            product_category: catalog::pick(rng, &PRODUCT_CATEGORIES).to_string(),
            product_price: round2(rng.gen_range(MIN_PRICE..=MAX_PRICE)),
            product_quantity: rng.gen_range(MIN_QUANTITY..=MAX_QUANTITY),
            product_brand: catalog::pick(rng, &PRODUCT_BRANDS).to_string(),
            currency: catalog::pick(rng, &CURRENCIES).to_string(),
            customer_id: catalog::username(rng),
            // the wire format only carries microseconds
            transaction_date: now.trunc_subsecs(6),
            payment_method: catalog::pick(rng, &PAYMENT_METHODS).to_string(),
            payment_status: catalog::pick(rng, &PAYMENT_STATUSES).to_string(),
            total_amount: 0.0,
        };
        tx.enrich();
        tx
    }

    /// Recomputes `total_amount` from price and quantity.
    pub fn enrich(&mut self) {
        self.total_amount = round2(self.product_price * f64::from(self.product_quantity));
    }

    /// Partition key used when publishing.
    pub fn key(&self) -> &str {
        &self.transaction_id
    }

    pub fn to_json(&self) -> Result<String, GeneratorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// `transactionDate` wire format, e.g. `2024-01-15T10:23:45.123456+0000`.
pub mod transaction_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
