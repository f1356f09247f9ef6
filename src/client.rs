//! Generation client: a provider driver plus HTTP transport.
//!
//! Keep the public surface small. [`GenerationClient`] implements
//! [`crate::relay::TextGenerator`], which is all the relay needs.

pub mod builder;
pub mod core;

pub use self::builder::GenerationClientBuilder;
pub use self::core::GenerationClient;
