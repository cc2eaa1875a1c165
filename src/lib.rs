//! ragchat - streaming client for retrieval-augmented chat backends
//!
//! Sends a query to `POST <base>/chat-messages`, decodes the `data: <json>`
//! event stream, accumulates the answer text, extracts the supporting
//! articles attached to each message and carries the conversation id from
//! one turn to the next.
//!
//! ```ignore
//! use ragchat::adapters::{InMemoryIdentity, ReqwestHttpClient};
//! use ragchat::client::ChatClient;
//! use ragchat::config::ClientConfig;
//!
//! let mut client = ChatClient::from_config(
//!     ClientConfig::from_env(),
//!     ReqwestHttpClient::new(),
//!     &InMemoryIdentity::new(),
//! )?;
//! let turn = client.ask("What is RAG?").await?;
//! println!("{}", turn.text());
//! ```

pub mod accumulator;
pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod session;
pub mod sse;
pub mod traits;

pub use accumulator::MessageAccumulator;
pub use client::{ChatClient, TurnOutcome};
pub use config::ClientConfig;
pub use error::{ChatError, ChatResult};
pub use session::ConversationSession;
pub use sse::StreamEvent;
