//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestMongo, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let db = mongo.database(&builder.database_name());
//!     let body = builder.character("main");
//! }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_character");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this builder, so tests sharing a server do not collide
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }

    /// Generate a unique nickname for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.nickname("hero"), "test-7-hero");
    /// ```
    pub fn nickname(&self, suffix: &str) -> String {
        format!("test-{}-{}", self.seed, suffix)
    }

    /// A create body that satisfies the character schema
    pub fn character(&self, suffix: &str) -> Value {
        json!({
            "realName": format!("Real Name {}", suffix),
            "nickname": self.nickname(suffix),
            "description": format!("Test character {}", suffix),
        })
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that a string is a 24-character hex ObjectId
    pub fn assert_object_id_hex(value: &str, context: &str) {
        assert!(
            value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit()),
            "{}: expected 24-char hex ObjectId, got {:?}",
            context,
            value
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
