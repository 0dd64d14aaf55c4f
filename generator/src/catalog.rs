//! Fixed value pools the generator draws from.

use rand::seq::SliceRandom;
use rand::Rng;

pub const PRODUCT_IDS: [&str; 10] = [
    "product_1",
    "product_2",
    "product_3",
    "product_4",
    "product_5",
    "product_6",
    "product_7",
    "product_8",
    "product_9",
    "product_10",
];

pub const PRODUCT_NAMES: [&str; 10] = [
    "laptop",
    "mouse",
    "keyboard",
    "monitor",
    "speaker",
    "printer",
    "scanner",
    "projector",
    "router",
    "switch",
];

pub const PRODUCT_CATEGORIES: [&str; 9] = [
    "electronics",
    "office",
    "computer",
    "accessories",
    "beauty",
    "storage",
    "home",
    "software",
    "other",
];

pub const PRODUCT_BRANDS: [&str; 10] = [
    "apple",
    "samsung",
    "dell",
    "hp",
    "lenovo",
    "microsoft",
    "sony",
    "logitech",
    "canon",
    "nikon",
];

pub const CURRENCIES: [&str; 10] = [
    "USD", "EUR", "GBP", "JPY", "KRW", "CNY", "INR", "BRL", "MXN", "ARS",
];

pub const PAYMENT_METHODS: [&str; 5] = ["credit_card", "debit_card", "paypal", "bank_transfer", "cash"];

pub const PAYMENT_STATUSES: [&str; 3] = ["success", "failed", "pending"];

const FIRST_NAMES: [&str; 16] = [
    "james", "mary", "john", "patricia", "robert", "jennifer", "michael", "linda", "david",
    "susan", "daniel", "karen", "kevin", "nancy", "brian", "laura",
];

const LAST_NAMES: [&str; 16] = [
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "wilson",
    "moore", "taylor", "thomas", "martin", "clark", "lewis", "walker",
];

/// Uniformly picks one entry of a non-empty pool.
pub fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    *pool.choose(rng).expect("value pools are never empty")
}

/// Synthesizes a throwaway customer username such as `jsmith123` or `smith.john`.
///
/// Every call is independent; there is no backing customer pool, so two
/// transactions sharing a customer is a coincidence of the draw.
pub fn username<R: Rng>(rng: &mut R) -> String {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);

    match rng.gen_range(0..5) {
        0 => format!("{}{}{}", &first[..1], last, rng.gen_range(1..1000)),
        1 => format!("{}.{}", last, first),
        2 => format!("{}{:02}", first, rng.gen_range(0..100)),
        3 => format!("{}{}", last, &first[..1]),
        _ => format!("{}_{}", first, last),
    }
}
