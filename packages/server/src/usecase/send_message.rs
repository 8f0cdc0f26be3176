//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加と new_message のブロードキャスト（送信者を含む）
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済みユーザーのメッセージ送信
//! - エッジケース：未ログイン接続からの送信（無視される）、同一ミリ秒の連続送信

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ChatRepository, ConnectionId, MessagePusher, MessageText, ServerEvent,
    Timestamp,
};

use super::error::DispatchError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChatMessage))` - 作成・ブロードキャストしたメッセージ
    /// * `Ok(None)` - 接続が未ログインのため無視した
    /// * `Err(DispatchError)` - ブロードキャスト失敗（メッセージはログに残る）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        text: MessageText,
    ) -> Result<Option<ChatMessage>, DispatchError> {
        let Some(session) = self.repository.lookup(connection_id).await else {
            return Ok(None);
        };

        let timestamp = Timestamp::new(self.clock.now_millis());
        let message = self
            .repository
            .append_message(session.username, text, timestamp)
            .await;

        self.message_pusher
            .broadcast(&ServerEvent::NewMessage(message.clone()), None)
            .await?;

        Ok(Some(message))
    }
}
