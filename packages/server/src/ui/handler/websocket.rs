//! WebSocket connection handlers.
//!
//! 接続ごとに以下の 2 つが動きます。
//!
//! - `pusher_loop`: 送信キューから WebSocket へ書き出すタスク
//! - `receive_loop`: フレームを `ClientMessage` に変換してユースケースへ振り分ける
//!
//! 接続時・フレーム受信時・切断時の処理は `AppState::dispatch_gate` を取得して
//! 実行するため、メッセージログの順序と各クライアントへの配信順序は一致します。
//! 振り分けはタスクを abort せずに最後まで実行されるので、状態の変更だけが
//! 行われてブロードキャストされない、ということは起きません。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Redirect, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, MessageText},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// `/`: WebSocket upgrades join the relay; plain requests get the web client
/// when a static directory is configured.
pub async fn root_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state))
            .into_response(),
        Err(_) if state.static_dir.is_some() => {
            Redirect::temporary("/index.html").into_response()
        }
        Err(rejection) => rejection.into_response(),
    }
}

/// Spawns a task that writes queued frames to the WebSocket.
///
/// The task ends when the queue is closed (the connection was unregistered)
/// or when the client can no longer be written to.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::channel(state.outbound_buffer);
    let (sender, receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);

    // 接続を登録して履歴を送信
    {
        let _gate = state.dispatch_gate.lock().await;
        match state
            .connect_client_usecase
            .execute(connection_id, tx)
            .await
        {
            Ok(replayed) => tracing::info!(
                "Client '{}' connected, replayed {} messages",
                connection_id,
                replayed
            ),
            Err(e) => tracing::warn!("Failed to send history to '{}': {}", connection_id, e),
        }
    }

    receive_loop(&state, connection_id, receiver, &mut send_task).await;
    send_task.abort();

    let _gate = state.dispatch_gate.lock().await;
    match state
        .disconnect_client_usecase
        .execute(connection_id)
        .await
    {
        Ok(Some(username)) => {
            tracing::info!("User '{}' left ('{}')", username, connection_id);
        }
        Ok(None) => tracing::info!("Client '{}' disconnected", connection_id),
        Err(e) => tracing::warn!(
            "Failed to broadcast user_left for '{}': {}",
            connection_id,
            e
        ),
    }
}

/// Read frames until the client closes or the writer stops.
///
/// Only the wait for the next frame races against the writer; a frame that
/// has been read is always dispatched to completion.
async fn receive_loop<S>(
    state: &AppState,
    connection_id: ConnectionId,
    mut receiver: S,
    writer: &mut JoinHandle<()>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let next = tokio::select! {
            next = receiver.next() => next,
            _ = &mut *writer => {
                tracing::debug!("Writer of '{}' stopped", connection_id);
                break;
            }
        };

        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(message) => dispatch(state, connection_id, message).await,
                Err(e) => tracing::warn!(
                    "Ignoring malformed frame from '{}': {}",
                    connection_id,
                    e
                ),
            },
            Message::Binary(data) => {
                tracing::debug!(
                    "Ignoring binary frame ({} bytes) from '{}'",
                    data.len(),
                    connection_id
                );
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}

/// Route one inbound frame to its use case.
async fn dispatch(state: &AppState, connection_id: ConnectionId, message: ClientMessage) {
    let _gate = state.dispatch_gate.lock().await;

    match message {
        ClientMessage::Login { username } => {
            match state.login_usecase.execute(connection_id, username).await {
                Ok(online_count) => tracing::info!(
                    "Client '{}' logged in ({} online)",
                    connection_id,
                    online_count
                ),
                Err(e) if e.is_rejection() => {
                    tracing::info!("Login rejected for '{}': {}", connection_id, e);
                }
                Err(e) => tracing::warn!("Login of '{}' failed: {}", connection_id, e),
            }
        }
        ClientMessage::Message { text } => {
            match state
                .send_message_usecase
                .execute(connection_id, MessageText::new(text))
                .await
            {
                Ok(Some(message)) => tracing::debug!(
                    "Message {} from '{}' broadcast",
                    message.id.value(),
                    message.username
                ),
                Ok(None) => ignored(connection_id, "message"),
                Err(e) => tracing::warn!("Failed to broadcast message: {}", e),
            }
        }
        ClientMessage::Typing { is_typing } => {
            match state
                .notify_typing_usecase
                .execute(connection_id, is_typing)
                .await
            {
                Ok(true) => {}
                Ok(false) => ignored(connection_id, "typing"),
                Err(e) => tracing::warn!("Failed to broadcast typing: {}", e),
            }
        }
        ClientMessage::Call(fields) => {
            match state.relay_call_usecase.execute(connection_id, fields).await {
                Ok(true) => tracing::debug!("Call request from '{}' relayed", connection_id),
                Ok(false) => ignored(connection_id, "call"),
                Err(e) => tracing::warn!("Failed to relay call request: {}", e),
            }
        }
    }
}

fn ignored(connection_id: ConnectionId, kind: &str) {
    tracing::debug!(
        "Ignoring '{}' from unauthenticated client '{}'",
        kind,
        connection_id
    );
}
