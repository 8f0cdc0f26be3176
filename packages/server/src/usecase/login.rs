//! UseCase: ログイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//! - ログイン成功時の login_success 返信と user_joined ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - オンライン中のユーザー名は 1 接続のみが保持できることを保証する
//! - 拒否時に login_error が本人にだけ返ることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーのログイン
//! - 異常系：オンライン中のユーザー名、ログイン済み接続からの再ログイン、空のユーザー名

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, ServerEvent, Timestamp, Username,
};

use super::error::LoginUseCaseError;

/// ログインのユースケース
pub struct LoginUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl LoginUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// ログインを実行
    ///
    /// 成功時は本人に `login_success` を送り、全接続（本人を含む）に
    /// `user_joined` をブロードキャストする。拒否時は本人に `login_error` を送る。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - ログイン後のオンライン人数
    /// * `Err(LoginUseCaseError)` - ログイン拒否、またはイベント送信失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        raw_username: String,
    ) -> Result<usize, LoginUseCaseError> {
        match self.try_login(connection_id, raw_username).await {
            Ok((username, online_count)) => {
                let reply = self
                    .message_pusher
                    .push_to(
                        connection_id,
                        &ServerEvent::LoginSuccess {
                            username: username.clone(),
                            online_count,
                        },
                    )
                    .await;
                self.message_pusher
                    .broadcast(
                        &ServerEvent::UserJoined {
                            username,
                            online_count,
                        },
                        None,
                    )
                    .await?;
                reply?;
                Ok(online_count)
            }
            Err(rejection) => {
                self.message_pusher
                    .push_to(
                        connection_id,
                        &ServerEvent::LoginError {
                            error: rejection.to_string(),
                        },
                    )
                    .await?;
                Err(rejection)
            }
        }
    }

    async fn try_login(
        &self,
        connection_id: ConnectionId,
        raw_username: String,
    ) -> Result<(Username, usize), LoginUseCaseError> {
        let username = Username::new(raw_username)?;
        let joined_at = Timestamp::new(self.clock.now_millis());
        let online_count = self
            .repository
            .login(connection_id, username.clone(), joined_at)
            .await?;
        Ok((username, online_count))
    }
}

#[cfg(test)]
mod tests {
    use hiroba_shared::time::FixedClock;
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{LoginError, ValueObjectError},
        usecase::test_support::{
            TestConnection, create_test_message_pusher, create_test_repository, username,
        },
    };

    fn create_usecase(
        repository: Arc<dyn ChatRepository>,
        pusher: Arc<dyn MessagePusher>,
    ) -> LoginUseCase {
        LoginUseCase::new(repository, pusher, Arc::new(FixedClock::new(1000)))
    }

    #[tokio::test]
    async fn test_login_success() {
        // テスト項目: ログイン成功時に login_success が本人に、user_joined が全員に送られる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let mut c1 = TestConnection::open(&pusher).await;

        // when (操作):
        let result = usecase.execute(c1.id, "alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert_eq!(
            c1.drain(),
            vec![
                json!({"type": "login_success", "username": "alice", "onlineCount": 1}),
                json!({"type": "user_joined", "username": "alice", "onlineCount": 1}),
            ]
        );
        let session = repository.lookup(c1.id).await.unwrap();
        assert_eq!(session.username, username("alice"));
        assert_eq!(session.joined_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_user_joined_reaches_unauthenticated_connections() {
        // テスト項目: user_joined は未ログインの接続にも届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository, pusher.clone());
        let c1 = TestConnection::open(&pusher).await;
        let mut lurker = TestConnection::open(&pusher).await;

        // when (操作):
        usecase.execute(c1.id, "alice".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            lurker.drain(),
            vec![json!({"type": "user_joined", "username": "alice", "onlineCount": 1})]
        );
    }

    #[tokio::test]
    async fn test_login_duplicate_username_is_rejected() {
        // テスト項目: オンライン中のユーザー名でのログインは login_error になり、登録状態は変わらない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let mut c1 = TestConnection::open(&pusher).await;
        let mut c2 = TestConnection::open(&pusher).await;
        usecase.execute(c1.id, "alice".to_string()).await.unwrap();
        c1.drain();
        c2.drain();

        // when (操作):
        let result = usecase.execute(c2.id, "alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(LoginUseCaseError::Rejected(LoginError::AlreadyOnline(
                "alice".to_string()
            )))
        );
        assert_eq!(
            c2.drain(),
            vec![json!({"type": "login_error", "error": "User 'alice' is already online"})]
        );
        assert!(c1.drain().is_empty());
        assert_eq!(repository.online_count().await, 1);
        assert!(repository.lookup(c2.id).await.is_none());
        assert_eq!(
            repository.lookup(c1.id).await.unwrap().username,
            username("alice")
        );
    }

    #[tokio::test]
    async fn test_login_while_authenticated_is_rejected() {
        // テスト項目: ログイン済みの接続からの再ログインは拒否され、ブロードキャストも発生しない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let mut c1 = TestConnection::open(&pusher).await;
        let mut other = TestConnection::open(&pusher).await;
        usecase.execute(c1.id, "alice".to_string()).await.unwrap();
        c1.drain();
        other.drain();

        // when (操作):
        let result = usecase.execute(c1.id, "bob".to_string()).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(LoginUseCaseError::Rejected(LoginError::AlreadyAuthenticated(_)))
        ));
        assert_eq!(
            c1.drain(),
            vec![json!({"type": "login_error", "error": "Already logged in as 'alice'"})]
        );
        assert!(other.drain().is_empty());
        assert_eq!(repository.online_usernames().await, vec![username("alice")]);
    }

    #[tokio::test]
    async fn test_login_blank_username_is_rejected() {
        // テスト項目: 空のユーザー名は login_error になる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository.clone(), pusher.clone());
        let mut c1 = TestConnection::open(&pusher).await;

        // when (操作):
        let result = usecase.execute(c1.id, "  ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(LoginUseCaseError::InvalidUsername(
                ValueObjectError::EmptyUsername
            ))
        );
        assert_eq!(
            c1.drain(),
            vec![json!({"type": "login_error", "error": "Username must not be empty"})]
        );
        assert_eq!(repository.online_count().await, 0);
    }

    #[tokio::test]
    async fn test_second_user_sees_updated_count() {
        // テスト項目: 2 人目のログインでオンライン人数が 2 になり、1 人目にも通知される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = create_usecase(repository, pusher.clone());
        let mut c1 = TestConnection::open(&pusher).await;
        let c2 = TestConnection::open(&pusher).await;
        usecase.execute(c1.id, "alice".to_string()).await.unwrap();
        c1.drain();

        // when (操作):
        let result = usecase.execute(c2.id, "bob".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        assert_eq!(
            c1.drain(),
            vec![json!({"type": "user_joined", "username": "bob", "onlineCount": 2})]
        );
    }
}
