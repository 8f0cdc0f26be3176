//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（有界 `mpsc::Sender<String>`）を管理
//! - イベントのシリアライズと送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! 送信キューの受信側は UI 層の `pusher_loop` が WebSocket に書き出します。
//! ここでは `try_send` のみを使うため、遅いクライアントが他のクライアントへの
//! 送信を待たせることはありません。キューが満杯の場合、そのフレームは破棄されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー（未ログインの接続を含む）
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中の接続数
    #[cfg(test)]
    pub(crate) async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

fn serialize(event: &ServerEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerMessage::from(event))
        .map_err(|e| MessagePushError::Serialization(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let payload = serialize(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&connection_id)
            .ok_or(MessagePushError::ConnectionNotFound(connection_id))?;
        sender.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::BufferFull(connection_id),
            TrySendError::Closed(_) => MessagePushError::ConnectionClosed(connection_id),
        })?;
        tracing::debug!("Pushed '{}' to connection '{}'", event.kind(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        event: &ServerEvent,
        exclude: Option<ConnectionId>,
    ) -> Result<usize, MessagePushError> {
        let payload = serialize(event)?;
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for (connection_id, sender) in clients.iter() {
            if Some(*connection_id) == exclude {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            match sender.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound buffer of connection '{}' is full, dropping '{}'",
                        connection_id,
                        event.kind()
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(
                        "Connection '{}' is closed, skipping '{}'",
                        connection_id,
                        event.kind()
                    );
                }
            }
        }
        tracing::debug!("Broadcasted '{}' to {} connection(s)", event.kind(), delivered);

        Ok(delivered)
    }
}
