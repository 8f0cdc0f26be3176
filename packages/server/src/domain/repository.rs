//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, ConnectionId, LoginError, MessageText, Session, Timestamp, Username,
};

/// Chat Repository trait
///
/// Session Registry と Message Log をまとめて扱うデータストアへのインターフェース。
/// 実装は全ての操作を互いに直列化しなければならない（同一ユーザー名の二重ログインを防ぐため）。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ユーザー名を接続に紐付ける。成功時はログイン後のオンライン人数を返す
    async fn login(
        &self,
        connection_id: ConnectionId,
        username: Username,
        joined_at: Timestamp,
    ) -> Result<usize, LoginError>;

    /// 接続のセッションを削除し、ユーザー名を返す（未ログインなら None）
    async fn logout(&self, connection_id: ConnectionId) -> Option<Username>;

    /// 接続に紐付くセッションを取得
    async fn lookup(&self, connection_id: ConnectionId) -> Option<Session>;

    /// オンライン人数を取得
    async fn online_count(&self) -> usize;

    /// オンラインユーザー名の一覧を取得（ソート済み）
    async fn online_usernames(&self) -> Vec<Username>;

    /// メッセージを作成してログの末尾に追加
    async fn append_message(
        &self,
        username: Username,
        text: MessageText,
        timestamp: Timestamp,
    ) -> ChatMessage;

    /// 直近 `limit` 件のメッセージを古い順で取得
    async fn recent_messages(&self, limit: usize) -> Vec<ChatMessage>;

    /// これまでに追加されたメッセージの総数を取得（保持上限で削除された分を含む）
    async fn total_messages(&self) -> usize;
}
