//! UseCase: 接続処理
//!
//! 新しい接続を送信対象として登録し、直近のメッセージ履歴を送信します。
//! 履歴はログイン前に送られます。

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, PusherChannel, ServerEvent,
};

use super::error::DispatchError;

/// 接続のユースケース
pub struct ConnectClientUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// 履歴として送信するメッセージ数
    history_limit: usize,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        history_limit: usize,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            history_limit,
        }
    }

    /// 接続を登録し、`history` を送信する
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信した履歴メッセージ数
    /// * `Err(DispatchError)` - 履歴の送信に失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, DispatchError> {
        self.message_pusher
            .register_connection(connection_id, sender)
            .await;

        let messages = self.repository.recent_messages(self.history_limit).await;
        let replayed = messages.len();
        self.message_pusher
            .push_to(connection_id, &ServerEvent::History { messages })
            .await?;

        Ok(replayed)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        domain::{MessageText, Timestamp},
        usecase::test_support::{create_test_message_pusher, create_test_repository, username},
    };

    #[tokio::test]
    async fn test_connect_sends_empty_history() {
        // テスト項目: メッセージがない場合、空の history が送信される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = ConnectClientUseCase::new(repository, pusher.clone(), 50);
        let (tx, mut rx) = mpsc::channel(8);

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame, serde_json::json!({"type": "history", "messages": []}));
        assert_eq!(pusher.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_connect_replays_only_last_messages() {
        // テスト項目: 履歴は直近 min(50, 総数) 件のみ、古い順で送信される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        for i in 0..55 {
            repository
                .append_message(
                    username("alice"),
                    MessageText::new(format!("m{}", i)),
                    Timestamp::new(i),
                )
                .await;
        }
        let usecase = ConnectClientUseCase::new(repository, pusher, 50);
        let (tx, mut rx) = mpsc::channel(8);

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(50));
        let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        let messages = frame["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 50);
        assert_eq!(messages[0]["text"], "m5");
        assert_eq!(messages[49]["text"], "m54");
        assert_eq!(messages[0]["type"], "message");
    }
}
