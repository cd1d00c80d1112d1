//! Subscription transport speaking the `graphql-transport-ws` protocol.
//!
//! Each subscription owns one socket. A driver task pumps frames from the
//! socket into a bounded channel; when the consumer drops the stream the
//! channel closes, the driver sends `complete` and closes the socket.

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    tungstenite::{
        client::IntoClientRequest,
        http::header::{HeaderValue, SEC_WEBSOCKET_PROTOCOL},
        Message,
    },
    MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, warn};

use super::{ErrorEntry, GraphqlError, GraphqlRequest, GraphqlResponse, PushStream, Subscriber};

pub const SUBPROTOCOL: &str = "graphql-transport-ws";

const SUBSCRIPTION_ID: &str = "1";
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
const BUFFER: usize = 16;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// Frames
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage<'a> {
    ConnectionInit,
    Subscribe {
        id: &'a str,
        payload: &'a GraphqlRequest,
    },
    Complete {
        id: &'a str,
    },
    Pong,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerMessage {
    ConnectionAck {},
    Next { payload: GraphqlResponse },
    Error { payload: Vec<ErrorEntry> },
    Complete {},
    Ping {},
    Pong {},
}

async fn send_frame(ws: &mut Socket, frame: &ClientMessage<'_>) -> Result<(), GraphqlError> {
    let text = serde_json::to_string(frame)?;
    ws.send(Message::Text(text.into()))
        .await
        .map_err(|e| GraphqlError::Transport(e.to_string()))
}

// ============================================================================
// Transport
// ============================================================================

pub struct WsTransport {
    endpoint: String,
}

impl WsTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn connect(&self) -> Result<Socket, GraphqlError> {
        let mut request = self
            .endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| GraphqlError::Transport(e.to_string()))?;
        request
            .headers_mut()
            .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static(SUBPROTOCOL));

        let (ws, _) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(|e| GraphqlError::Transport(e.to_string()))?;
        Ok(ws)
    }

    /// `connection_init` until `connection_ack`, then `subscribe`.
    async fn handshake(ws: &mut Socket, request: &GraphqlRequest) -> Result<(), GraphqlError> {
        send_frame(ws, &ClientMessage::ConnectionInit).await?;

        loop {
            let frame = ws
                .next()
                .await
                .ok_or_else(|| GraphqlError::Protocol("connection closed before ack".into()))?
                .map_err(|e| GraphqlError::Transport(e.to_string()))?;

            match frame {
                Message::Text(text) => match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(ServerMessage::ConnectionAck {}) => break,
                    Ok(ServerMessage::Ping {}) => send_frame(ws, &ClientMessage::Pong).await?,
                    Ok(other) => {
                        return Err(GraphqlError::Protocol(format!(
                            "expected connection_ack, got {other:?}"
                        )))
                    }
                    Err(e) => return Err(GraphqlError::Protocol(e.to_string())),
                },
                Message::Close(_) => {
                    return Err(GraphqlError::Protocol("connection closed before ack".into()))
                }
                _ => {}
            }
        }

        send_frame(
            ws,
            &ClientMessage::Subscribe {
                id: SUBSCRIPTION_ID,
                payload: request,
            },
        )
        .await
    }
}

#[async_trait]
impl Subscriber for WsTransport {
    async fn subscribe(&self, request: GraphqlRequest) -> Result<PushStream, GraphqlError> {
        let mut ws = self.connect().await?;

        tokio::time::timeout(HANDSHAKE_TIMEOUT, Self::handshake(&mut ws, &request))
            .await
            .map_err(|_| GraphqlError::Protocol("timed out waiting for connection_ack".into()))??;

        debug!(operation = request.operation_name, "subscription started");

        let (tx, rx) = mpsc::channel(BUFFER);
        tokio::spawn(drive(ws, tx, request.operation_name));

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        Ok(stream.boxed())
    }
}

/// Pumps server frames into `tx` until either side goes away.
async fn drive(
    mut ws: Socket,
    tx: mpsc::Sender<Result<Value, GraphqlError>>,
    operation: &'static str,
) {
    loop {
        tokio::select! {
            _ = tx.closed() => {
                let _ = send_frame(&mut ws, &ClientMessage::Complete { id: SUBSCRIPTION_ID }).await;
                let _ = ws.close(None).await;
                debug!(operation, "subscription cancelled");
                return;
            }
            frame = ws.next() => {
                let frame = match frame {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => {
                        let _ = tx.send(Err(GraphqlError::Transport(e.to_string()))).await;
                        return;
                    }
                    None => {
                        debug!(operation, "subscription socket closed");
                        return;
                    }
                };

                match frame {
                    Message::Text(text) => match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(ServerMessage::Next { payload }) => {
                            if tx.send(payload.into_result()).await.is_err() {
                                return;
                            }
                        }
                        Ok(ServerMessage::Error { payload }) => {
                            let _ = tx.send(Err(ErrorEntry::into_error(payload))).await;
                            return;
                        }
                        Ok(ServerMessage::Complete {}) => {
                            debug!(operation, "subscription completed by server");
                            return;
                        }
                        Ok(ServerMessage::Ping {}) => {
                            let _ = send_frame(&mut ws, &ClientMessage::Pong).await;
                        }
                        Ok(ServerMessage::ConnectionAck {} | ServerMessage::Pong {}) => {}
                        Err(e) => warn!(operation, "ignoring malformed frame: {e}"),
                    },
                    Message::Ping(data) => {
                        let _ = ws.send(Message::Pong(data)).await;
                    }
                    Message::Close(_) => {
                        debug!(operation, "subscription socket closed by server");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
