//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: [`StubSource`], a scripted [`PayloadSource`](crate::port::PayloadSource).
//! - [`payload`]: Canned inventory and sales response bodies.

pub mod payload;
pub mod source;

pub use source::StubSource;
