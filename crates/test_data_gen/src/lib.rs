//! Snapshot generator for schema-graph integration tests.
//!
//! Produces deterministic `MetadataSnapshot` values with a known mix of
//! table classifications: a hub referenced by satellites, a lookup, a
//! junction, a self-referencing table, and an orphan in every schema.
//!
//! # Example
//!
//! ```rust
//! use test_data_gen::{Generator, Scale};
//!
//! // Same seed, same snapshot
//! let mut gen = Generator::new(42, Scale::Small);
//! let snapshot = gen.generate();
//!
//! assert!(!snapshot.tables.is_empty());
//! ```

pub mod fake;
pub mod generator;

pub use fake::FakeData;
pub use generator::{Generator, Scale};
