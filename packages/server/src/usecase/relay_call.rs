//! UseCase: 通話リクエストの中継
//!
//! 通話機能のスタブ。サーバーは通話状態を持たず、受け取ったフィールドを
//! `call_request` として全接続（送信者を含む）にそのまま転送するだけです。
//! `type` と `from` はサーバーが設定し、クライアントからの値は転送しません。

use std::sync::Arc;

use crate::domain::{CallFields, ChatRepository, ConnectionId, MessagePusher, ServerEvent};

use super::error::DispatchError;

/// サーバーが設定するため転送しないフィールド
const RESERVED_FIELDS: [&str; 2] = ["type", "from"];

/// 通話リクエスト中継のユースケース
pub struct RelayCallUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayCallUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `call_request` をブロードキャストする。未ログインなら無視して `Ok(false)`
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        mut fields: CallFields,
    ) -> Result<bool, DispatchError> {
        let Some(session) = self.repository.lookup(connection_id).await else {
            return Ok(false);
        };

        for reserved in RESERVED_FIELDS {
            fields.remove(reserved);
        }

        self.message_pusher
            .broadcast(
                &ServerEvent::CallRequest {
                    from: session.username,
                    fields,
                },
                None,
            )
            .await?;

        Ok(true)
    }
}
