mod article;
mod message;
mod request;

pub use article::{Article, RawResource};
pub use message::{AccumulatedMessage, ChatTurn};
pub use request::{ChatRequest, RESPONSE_MODE_STREAMING};
