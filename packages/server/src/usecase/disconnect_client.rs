//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - ログイン済みユーザーの切断時に user_left が残りの接続に届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済みユーザーの切断
//! - エッジケース：ログイン前の切断（通知なし）、切断後の同名ログイン

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, ServerEvent, Username};

use super::error::DispatchError;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 接続を送信対象から外し、ログイン済みであればセッションを削除して
    /// 残りの全接続に `user_left` をブロードキャストする。
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Username))` - ログアウトしたユーザー名
    /// * `Ok(None)` - ログイン前の切断
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Option<Username>, DispatchError> {
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        let Some(username) = self.repository.logout(connection_id).await else {
            return Ok(None);
        };
        let online_count = self.repository.online_count().await;

        self.message_pusher
            .broadcast(
                &ServerEvent::UserLeft {
                    username: username.clone(),
                    online_count,
                },
                None,
            )
            .await?;

        Ok(Some(username))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        domain::Timestamp,
        usecase::test_support::{
            TestConnection, create_test_message_pusher, create_test_repository, username,
        },
    };

    #[tokio::test]
    async fn test_disconnect_broadcasts_user_left() {
        // テスト項目: ログイン済みユーザーの切断で、残りの接続に更新後の人数付き user_left が届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), pusher.clone());
        let mut alice = TestConnection::logged_in(&pusher, &repository, "alice").await;
        let mut bob = TestConnection::logged_in(&pusher, &repository, "bob").await;

        // when (操作):
        let result = usecase.execute(alice.id).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some(username("alice"))));
        assert_eq!(
            bob.drain(),
            vec![json!({"type": "user_left", "username": "alice", "onlineCount": 1})]
        );
        assert!(alice.drain().is_empty());
        assert_eq!(repository.online_usernames().await, vec![username("bob")]);
    }

    #[tokio::test]
    async fn test_disconnect_before_login_is_silent() {
        // テスト項目: ログイン前の切断では何も通知されない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), pusher.clone());
        let stranger = TestConnection::open(&pusher).await;
        let mut alice = TestConnection::logged_in(&pusher, &repository, "alice").await;

        // when (操作):
        let result = usecase.execute(stranger.id).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert!(alice.drain().is_empty());
        assert_eq!(pusher.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_username_can_be_reused_after_disconnect() {
        // テスト項目: 切断後は同じユーザー名で新しい接続からログインできる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), pusher.clone());
        let alice = TestConnection::logged_in(&pusher, &repository, "alice").await;
        usecase.execute(alice.id).await.unwrap();

        // when (操作):
        let result = repository
            .login(ConnectionId::generate(), username("alice"), Timestamp::new(1))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
    }
}
