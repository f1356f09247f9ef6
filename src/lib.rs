//! # prompt-improver
//!
//! Turns a draft chat prompt into a short list of improved rewordings by
//! asking a generative-language API (Google Gemini by default) for a
//! numbered list and parsing whatever comes back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use prompt_improver::{GenerationClientBuilder, KeyringStore, Relay, RelayConfig};
//!
//! #[tokio::main]
//! async fn main() -> prompt_improver::Result<()> {
//!     let config = RelayConfig::load(None)?;
//!     let client = GenerationClientBuilder::new().config(config.clone()).build()?;
//!     let relay = Relay::new(Arc::new(client)).with_language(config.language);
//!
//!     let result = relay
//!         .improve_with_store("explain monads", &KeyringStore::new())
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`relay`] | Instruction template, response parsing, the `improve` operation |
//! | [`credentials`] | API key storage (OS keyring, in-memory) |
//! | [`client`] | Generation client over a provider driver and HTTP transport |
//! | [`drivers`] | Provider request/response adaptation (Gemini) |
//! | [`dispatch`] | Inbound `improvePrompt` commands and the line-delimited JSON loop |
//! | [`config`] | Defaults, YAML file and environment configuration |
//! | [`types`] | Wire types: requests, commands, results |

pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod drivers;
pub mod relay;
pub mod transport;
pub mod types;

pub use client::{GenerationClient, GenerationClientBuilder};
pub use config::RelayConfig;
pub use credentials::{Credential, CredentialStore, KeyringStore, MemoryStore};
pub use dispatch::Dispatcher;
pub use relay::{parse_suggestions, Relay, TemplateLanguage, TextGenerator};
pub use types::{ImprovementRequest, ImprovementResult, InboundCommand};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
