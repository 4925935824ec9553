//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated database, in-memory SQLite or a PostgreSQL
//!   container (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::sqlite().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let category = builder.category("books");
//!     let name = builder.name("product", "main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Values derived from the same seed are identical across runs, and values
/// from different test names don't collide in a shared database.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A category label unique to this builder.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.category("books"), "books-7");
    /// ```
    pub fn category(&self, base: &str) -> String {
        format!("{}-{}", base, self.seed)
    }

    /// A product name unique to this builder, e.g. `test-product-7-main`.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `items` is sorted ascending by `key`
    pub fn assert_sorted_by<T, K, F>(items: &[T], key: F, context: &str)
    where
        K: PartialOrd + Debug,
        F: Fn(&T) -> K,
    {
        for (i, pair) in items.windows(2).enumerate() {
            let (a, b) = (key(&pair[0]), key(&pair[1]));
            assert!(
                a <= b,
                "{}: items {} and {} out of order ({:?} > {:?})",
                context,
                i,
                i + 1,
                a,
                b
            );
        }
    }
}
