//! MessagePusher trait 定義
//!
//! Broadcast Engine のインターフェース。クライアントへのイベント送信を抽象化します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// Outbound channel of one connection. Carries serialized frames.
pub type PusherChannel = mpsc::Sender<String>;

/// Broadcast Engine
///
/// 接続中（未ログインを含む）の全クライアントへの送信を担当します。
/// 接続の登録・解除は UI 層が WebSocket の upgrade / close 時に行います。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を送信対象として登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を送信対象から解除
    async fn unregister_connection(&self, connection_id: ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 全接続（`exclude` を除く）にイベントを送信
    ///
    /// イベントのシリアライズは 1 回だけ行われる。個々の接続への送信失敗は
    /// エラーにならずスキップされる。
    ///
    /// # Returns
    ///
    /// 送信キューに積めた接続数
    async fn broadcast(
        &self,
        event: &ServerEvent,
        exclude: Option<ConnectionId>,
    ) -> Result<usize, MessagePushError>;
}
