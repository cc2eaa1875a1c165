//! Implementations of the collaborator traits.
//!
//! - [`ReqwestHttpClient`] - production transport
//! - [`FileIdentity`] / [`InMemoryIdentity`] - caller identity storage
//! - [`mock::MockHttpClient`] - scripted transport for tests

pub mod identity;
pub mod mock;
pub mod reqwest_client;

pub use identity::{FileIdentity, InMemoryIdentity};
pub use reqwest_client::ReqwestHttpClient;
