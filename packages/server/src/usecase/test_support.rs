//! Helpers shared by the use case tests.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{ChatRepository, ConnectionId, MessagePusher, Timestamp, Username},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
};

pub fn username(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}

pub fn create_test_repository() -> Arc<InMemoryChatRepository> {
    Arc::new(InMemoryChatRepository::new())
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// A registered connection with its outbound queue.
pub struct TestConnection {
    pub id: ConnectionId,
    pub rx: mpsc::Receiver<String>,
}

impl TestConnection {
    pub async fn open(pusher: &WebSocketMessagePusher) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let id = ConnectionId::generate();
        pusher.register_connection(id, tx).await;
        Self { id, rx }
    }

    /// Open a connection and log it in directly through the repository.
    pub async fn logged_in(
        pusher: &WebSocketMessagePusher,
        repository: &InMemoryChatRepository,
        name: &str,
    ) -> Self {
        let conn = Self::open(pusher).await;
        repository
            .login(conn.id, username(name), Timestamp::new(0))
            .await
            .unwrap();
        conn
    }

    /// Drain every frame queued so far, parsed as JSON.
    pub fn drain(&mut self) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }
}
