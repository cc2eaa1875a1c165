//! Trait abstractions for the client's external collaborators.
//!
//! - [`HttpClient`] - streaming HTTP transport
//! - [`IdentityProvider`] - persistent caller identity storage

pub mod http;
pub mod identity;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use identity::{resolve_user_id, IdentityError, IdentityProvider};
