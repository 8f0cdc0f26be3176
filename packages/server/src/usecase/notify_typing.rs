//! UseCase: タイピング通知

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, ServerEvent};

use super::error::DispatchError;

/// タイピング通知のユースケース
pub struct NotifyTypingUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 送信者以外の全接続に `user_typing` を送る
    ///
    /// 未ログインの接続からの通知は無視し、`Ok(false)` を返す。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Result<bool, DispatchError> {
        let Some(session) = self.repository.lookup(connection_id).await else {
            return Ok(false);
        };

        self.message_pusher
            .broadcast(
                &ServerEvent::UserTyping {
                    username: session.username,
                    is_typing,
                },
                Some(connection_id),
            )
            .await?;

        Ok(true)
    }
}
