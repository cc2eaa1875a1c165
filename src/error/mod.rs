//! Error handling for the chat client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: network and stream errors
//! - **Unified Error Type**: `ChatError`, delivered to the error callback
//! - **Result Type Alias**: `ChatResult<T>`
//!
//! # Propagation
//!
//! | Failure | Handling |
//! |---------|----------|
//! | Transport failure (connect, non-2xx, body read) | error callback once, turn aborted |
//! | Backend `error` event | error callback once, turn aborted |
//! | Malformed frame | logged, frame skipped |
//! | Malformed resource record | logged, resource dropped |

mod category;
mod chat_error;
mod network;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use network::NetworkError;
pub use result::ChatResult;
pub use stream::StreamError;
