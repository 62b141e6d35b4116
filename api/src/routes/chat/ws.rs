//! Per-connection chat socket.
//!
//! The socket pings every 5s and gives up after 10s without any client
//! traffic. Messages typed by the client are sent as the token subject and
//! come back through the live feed like everyone else's.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;

use stazy_core::domain::entities::message::ChatMessage;
use stazy_shared::errors::error_codes;
use stazy_shared::validation::mask_email;

use crate::dto::chat::{ChatSocketQuery, IncomingChatFrame, OutgoingChatFrame};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::{AppState, DynChatService};

#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

/// Handler for GET /api/chats/ws?token=..
///
/// The token may also come as a bearer header. Authentication happens
/// before the upgrade, so a bad token gets a plain 401 JSON response.
pub async fn chat_socket(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
    query: web::Query<ChatSocketQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let token = query
        .into_inner()
        .token
        .or_else(|| bearer_token(&req))
        .ok_or(ApiError::MissingToken)?;
    let auth = AuthContext::from_token(&state.token_service, &token)?;

    let (response, session, stream) = actix_ws::handle(&req, body)?;

    let chat = state.chat_service.clone();
    let feed = chat.subscribe(&auth.email).await;
    tracing::info!(user = %mask_email(&auth.email), "Chat socket connected");

    actix_web::rt::spawn(async move {
        ChatSession::new(chat, auth.email).run(session, stream, feed).await;
    });

    Ok(response)
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    FeedClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

struct ChatSession {
    chat: Arc<DynChatService>,
    email: String,
}

impl ChatSession {
    fn new(chat: Arc<DynChatService>, email: String) -> Self {
        Self { chat, email }
    }

    async fn run(
        &self,
        mut session: Session,
        mut stream: MessageStream,
        mut feed: broadcast::Receiver<ChatMessage>,
    ) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    if Instant::now().duration_since(last_heartbeat) > CLIENT_TIMEOUT {
                        Err(SessionError::HeartbeatTimeout)
                    } else {
                        session.ping(b"").await.map_err(SessionError::Network)
                    }
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message).await
                }
                delivered = feed.recv() => {
                    self.handle_feed(&mut session, delivered).await
                }
            };

            if let Err(error) = result {
                self.chat.unsubscribe(&self.email, feed).await;
                self.shutdown(session, error).await;
                return;
            }
        }
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let message = match message {
            Some(Ok(message)) => message,
            Some(Err(error)) => return Err(SessionError::Protocol(error)),
            None => return Err(SessionError::StreamClosed),
        };

        *last_heartbeat = Instant::now();
        match message {
            Message::Ping(payload) => session.pong(&payload).await.map_err(SessionError::Network),
            Message::Text(text) => self.handle_text(session, &text).await,
            Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
            Message::Pong(_) | Message::Binary(_) | Message::Continuation(_) | Message::Nop => Ok(()),
        }
    }

    /// Send a chat message typed by the client
    ///
    /// Bad frames are answered with an error frame; the socket stays open.
    async fn handle_text(&self, session: &mut Session, text: &str) -> Result<(), SessionError> {
        let frame = match serde_json::from_str::<IncomingChatFrame>(text) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::debug!(error = %error, "Malformed chat frame");
                let reply = OutgoingChatFrame::Error {
                    error: error_codes::VALIDATION_ERROR.to_string(),
                    message: "Expected {\"recipientEmail\", \"content\"}".to_string(),
                };
                return send_json(session, &reply).await;
            }
        };

        if let Err(error) = self
            .chat
            .send(&self.email, &frame.recipient_email, &frame.content)
            .await
        {
            let error = ApiError::from(error);
            let reply = OutgoingChatFrame::Error {
                error: error.code().to_string(),
                message: error.to_string(),
            };
            return send_json(session, &reply).await;
        }

        Ok(())
    }

    async fn handle_feed(
        &self,
        session: &mut Session,
        delivered: Result<ChatMessage, RecvError>,
    ) -> Result<(), SessionError> {
        match delivered {
            Ok(message) => send_json(session, &OutgoingChatFrame::Message(message.into())).await,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(user = %mask_email(&self.email), skipped, "Chat socket lagging, messages dropped");
                Ok(())
            }
            Err(RecvError::Closed) => Err(SessionError::FeedClosed),
        }
    }

    async fn shutdown(&self, session: Session, error: SessionError) {
        let reason = match error {
            SessionError::HeartbeatTimeout => {
                tracing::warn!(user = %mask_email(&self.email), "Chat socket heartbeat timeout");
                Some(CloseReason {
                    code: CloseCode::Normal,
                    description: Some("heartbeat timeout".to_owned()),
                })
            }
            SessionError::Protocol(error) => {
                tracing::warn!(error = %error, "Chat socket protocol error");
                Some(CloseReason {
                    code: CloseCode::Protocol,
                    description: Some("protocol error".to_owned()),
                })
            }
            SessionError::FeedClosed => Some(CloseReason {
                code: CloseCode::Away,
                description: None,
            }),
            SessionError::ClientClosed(reason) => reason,
            SessionError::StreamClosed | SessionError::Network(_) => {
                tracing::debug!(user = %mask_email(&self.email), "Chat socket dropped");
                return;
            }
        };

        if let Err(error) = session.close(reason).await {
            tracing::debug!(error = %error, "Failed to close chat socket");
        }
    }
}

async fn send_json(session: &mut Session, frame: &OutgoingChatFrame) -> Result<(), SessionError> {
    match serde_json::to_string(frame) {
        Ok(body) => session.text(body).await.map_err(SessionError::Network),
        Err(error) => {
            tracing::warn!(error = %error, "Failed to serialize chat frame");
            Ok(())
        }
    }
}
