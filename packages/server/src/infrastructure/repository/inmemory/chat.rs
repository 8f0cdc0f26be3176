//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! Session Registry と Message Log を 1 つの Mutex で保護し、
//! 全ての操作（ログインの check-and-set、メッセージ追加）を直列化します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ChatRepository, ConnectionId, LoginError, MessageLog, MessageText, Session,
    SessionRegistry, Timestamp, Username,
};

/// Registry と Log をまとめた共有状態
#[derive(Debug, Default)]
struct ChatState {
    registry: SessionRegistry,
    log: MessageLog,
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    state: Mutex<ChatState>,
}

impl InMemoryChatRepository {
    /// 保存件数無制限の InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self::with_retention(None)
    }

    /// メッセージ保持上限付きの InMemoryChatRepository を作成（`None` = 無制限）
    pub fn with_retention(retention: Option<usize>) -> Self {
        Self {
            state: Mutex::new(ChatState {
                registry: SessionRegistry::new(),
                log: MessageLog::with_retention(retention),
            }),
        }
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn login(
        &self,
        connection_id: ConnectionId,
        username: Username,
        joined_at: Timestamp,
    ) -> Result<usize, LoginError> {
        let mut state = self.state.lock().await;
        state.registry.login(connection_id, username, joined_at)
    }

    async fn logout(&self, connection_id: ConnectionId) -> Option<Username> {
        let mut state = self.state.lock().await;
        state.registry.logout(connection_id)
    }

    async fn lookup(&self, connection_id: ConnectionId) -> Option<Session> {
        let state = self.state.lock().await;
        state.registry.lookup(connection_id).cloned()
    }

    async fn online_count(&self) -> usize {
        let state = self.state.lock().await;
        state.registry.online_count()
    }

    async fn online_usernames(&self) -> Vec<Username> {
        let state = self.state.lock().await;
        state.registry.online_usernames()
    }

    async fn append_message(
        &self,
        username: Username,
        text: MessageText,
        timestamp: Timestamp,
    ) -> ChatMessage {
        let mut state = self.state.lock().await;
        state.log.append(username, text, timestamp)
    }

    async fn recent_messages(&self, limit: usize) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.log.recent_messages(limit)
    }

    async fn total_messages(&self) -> usize {
        let state = self.state.lock().await;
        state.log.total_appended()
    }
}
