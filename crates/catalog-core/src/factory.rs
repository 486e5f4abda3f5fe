//! # Product Factory
//!
//! Randomized, valid products for tests and seeding.
//!
//! ## Generated Products
//! - Name: one of a small fixed list, so name collisions are common
//! - Description: a few lorem-style words
//! - Price: 0.50 - 2000.00, two decimals
//! - Availability and category: uniform random
//!
//! Every product comes back unpersisted (`id == None`).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::price::Price;
use crate::types::{Category, Product};

/// Candidate product names.
pub const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

/// Lowest generated price, in cents.
const MIN_PRICE_CENTS: i64 = 50;

/// Highest generated price, in cents.
const MAX_PRICE_CENTS: i64 = 200_000;

/// Builds random products.
///
/// ## Usage
/// ```rust
/// use catalog_core::factory::ProductFactory;
///
/// let product = ProductFactory::build();
/// assert!(product.id().is_none());
///
/// let batch = ProductFactory::build_batch(10);
/// assert_eq!(batch.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFactory;

impl ProductFactory {
    /// Builds one product using the thread-local RNG.
    pub fn build() -> Product {
        Self::build_with(&mut rand::thread_rng())
    }

    /// Builds `count` products using the thread-local RNG.
    pub fn build_batch(count: usize) -> Vec<Product> {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| Self::build_with(&mut rng)).collect()
    }

    /// Builds one product from the given RNG (seed it for reproducible data).
    pub fn build_with<R: Rng + ?Sized>(rng: &mut R) -> Product {
        let name = NAMES.choose(rng).copied().unwrap_or("Hat");
        let category = Category::ALL.choose(rng).copied().unwrap_or_default();

        let word_count = rng.gen_range(3..=8);
        let description = (0..word_count)
            .filter_map(|_| WORDS.choose(rng).copied())
            .collect::<Vec<_>>()
            .join(" ");

        let cents = rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS);
        // The range is non-negative, so this never falls back.
        let price = Price::from_cents(cents).unwrap_or_default();

        Product::new(name, description, price, rng.gen_bool(0.5), category)
    }
}
