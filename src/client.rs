//! Chat client for the backend's `/chat-messages` endpoint.
//!
//! One [`ChatClient`] is one conversation. Each call to
//! [`subscribe`](ChatClient::subscribe) sends a query, then reads the
//! streamed response frame by frame and reports typed events to the caller
//! as they arrive.

use futures_util::StreamExt;

use crate::accumulator::MessageAccumulator;
use crate::config::ClientConfig;
use crate::error::{ChatError, ChatResult, StreamError};
use crate::models::{ChatRequest, ChatTurn};
use crate::resources::ResourceExtractor;
use crate::session::ConversationSession;
use crate::sse::{frame_stream, EventDispatcher, StreamEvent};
use crate::traits::{resolve_user_id, Headers, HttpClient, IdentityProvider};

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The response stream was read to the end.
    Finished,
    /// The backend sent an `error` event; the rest of the stream was not read.
    BackendError,
    /// The request could not be sent or the body could not be read.
    TransportFailed,
}

impl TurnOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, TurnOutcome::Finished)
    }
}

/// Streaming chat client bound to one conversation.
pub struct ChatClient<C: HttpClient> {
    config: ClientConfig,
    transport: C,
    user_id: String,
    session: ConversationSession,
    extractor: ResourceExtractor,
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client with an already known caller identifier.
    pub fn new(config: ClientConfig, transport: C, user_id: impl Into<String>) -> Self {
        Self {
            config,
            transport,
            user_id: user_id.into(),
            session: ConversationSession::new(),
            extractor: ResourceExtractor::new(),
        }
    }

    /// Validate `config` and resolve the caller identifier.
    ///
    /// A user set in the config wins; otherwise the identity provider is
    /// asked, and generates and stores an id on first use.
    pub fn from_config<P>(config: ClientConfig, transport: C, identity: &P) -> ChatResult<Self>
    where
        P: IdentityProvider + ?Sized,
    {
        config.validate()?;
        let user_id = match config.user.clone() {
            Some(user) => user,
            None => resolve_user_id(identity)?,
        };
        Ok(Self::new(config, transport, user_id))
    }

    /// Use a specific resource extractor (fixed clock in tests).
    pub fn with_extractor(mut self, extractor: ResourceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Id of the ongoing conversation, if a turn has completed.
    pub fn conversation_id(&self) -> Option<&str> {
        self.session.conversation_id()
    }

    /// Start a new conversation with the next query.
    pub fn reset_conversation(&mut self) {
        self.session.reset();
    }

    /// Request body for `query` in the current conversation.
    pub fn build_request(&self, query: &str) -> ChatRequest {
        ChatRequest::new(query, self.session.request_value(), self.user_id.as_str())
    }

    /// Request headers.
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(key) = &self.config.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {}", key));
        }
        headers
    }

    /// Run one turn.
    ///
    /// `on_event` receives every chunk, end and complete event in stream
    /// order. `on_error` is called at most once: for a failed request, a
    /// broken body stream, or an `error` event from the backend. Events
    /// delivered before a failure are not retracted.
    ///
    /// Taking `&mut self` keeps turns on one conversation strictly
    /// sequential.
    pub async fn subscribe<E, F>(&mut self, query: &str, mut on_event: E, on_error: F) -> TurnOutcome
    where
        E: FnMut(StreamEvent),
        F: FnOnce(ChatError),
    {
        let url = self.config.chat_messages_url();
        let body = match serde_json::to_string(&self.build_request(query)) {
            Ok(body) => body,
            Err(e) => {
                on_error(e.into());
                return TurnOutcome::TransportFailed;
            }
        };
        let headers = self.headers();

        tracing::info!(
            %url,
            conversation_id = self.session.request_value(),
            query_len = query.len(),
            "sending chat request"
        );

        let source = match self.transport.post_stream(&url, &body, &headers).await {
            Ok(source) => source,
            Err(e) => {
                tracing::error!(error = %e, "chat request failed");
                on_error(e.into());
                return TurnOutcome::TransportFailed;
            }
        };

        let mut frames = Box::pin(frame_stream(source));
        let mut dispatcher =
            EventDispatcher::new(&mut self.session).with_extractor(self.extractor.clone());

        while let Some(item) = frames.next().await {
            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(error = %e, "response stream failed");
                    on_error(
                        StreamError::ConnectionLost {
                            message: e.to_string(),
                        }
                        .into(),
                    );
                    return TurnOutcome::TransportFailed;
                }
            };

            match dispatcher.dispatch(&frame) {
                Some(StreamEvent::Error { message, code }) => {
                    on_error(StreamError::BackendError { code, message }.into());
                    return TurnOutcome::BackendError;
                }
                Some(event) => on_event(event),
                None => {}
            }
        }

        tracing::debug!("chat stream finished");
        TurnOutcome::Finished
    }

    /// Run one turn and collect the result.
    ///
    /// Backend and transport failures are returned as `Err`; content
    /// received before the failure is discarded along with the turn.
    pub async fn ask(&mut self, query: &str) -> ChatResult<ChatTurn> {
        let mut accumulator = MessageAccumulator::new();
        let mut failure = None;

        self.subscribe(
            query,
            |event| {
                accumulator.apply(&event);
            },
            |err| failure = Some(err),
        )
        .await;

        if let Some(err) = failure {
            return Err(err);
        }

        let (messages, answer) = accumulator.into_parts();
        Ok(ChatTurn {
            query: query.to_string(),
            messages,
            answer,
            conversation_id: self.conversation_id().map(str::to_string),
        })
    }
}
