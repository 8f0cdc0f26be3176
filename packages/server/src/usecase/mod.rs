//! UseCase 層
//!
//! プロトコルの各操作（接続・ログイン・メッセージ送信・タイピング通知・
//! 通話リクエスト中継・切断・状態取得）を 1 つずつユースケースとして実装します。
//!
//! ユースケース自体は互いに直列化しません。ログ順序と配信順序を一致させるため、
//! UI 層がディスパッチゲートを取得した状態で呼び出します。

mod connect_client;
mod disconnect_client;
mod error;
mod get_status;
mod login;
mod notify_typing;
mod relay_call;
mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{DispatchError, LoginUseCaseError};
pub use get_status::{GetStatusUseCase, StatusSnapshot};
pub use login::LoginUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use relay_call::RelayCallUseCase;
pub use send_message::SendMessageUseCase;
