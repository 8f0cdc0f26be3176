//! Server state shared by every handler.

use std::{path::PathBuf, sync::Arc};

use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::{
    domain::{ChatRepository, MessagePusher},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetStatusUseCase, LoginUseCase,
        NotifyTypingUseCase, RelayCallUseCase, SendMessageUseCase,
    },
};

use super::config::ServerConfig;

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続・履歴送信のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// LoginUseCase（ログインのユースケース）
    pub login_usecase: Arc<LoginUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// NotifyTypingUseCase（タイピング通知のユースケース）
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// RelayCallUseCase（通話リクエスト中継のユースケース）
    pub relay_call_usecase: Arc<RelayCallUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetStatusUseCase（状態取得のユースケース）
    pub get_status_usecase: Arc<GetStatusUseCase>,
    /// ディスパッチゲート
    ///
    /// 状態の変更とその結果のブロードキャストを 1 ステップとして実行するため、
    /// 接続時の履歴送信・受信フレームの処理・切断処理はすべてこのロックの下で行う。
    pub dispatch_gate: Mutex<()>,
    /// 接続ごとの送信キュー容量
    pub outbound_buffer: usize,
    /// Web クライアントの静的ファイルディレクトリ
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Wire every use case to the given repository, pusher and clock.
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                config.history_limit,
            )),
            login_usecase: Arc::new(LoginUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            )),
            notify_typing_usecase: Arc::new(NotifyTypingUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            relay_call_usecase: Arc::new(RelayCallUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher,
            )),
            get_status_usecase: Arc::new(GetStatusUseCase::new(repository)),
            dispatch_gate: Mutex::new(()),
            outbound_buffer: config.effective_outbound_buffer(),
            static_dir: config.static_dir.clone(),
        }
    }

    /// In-memory repository, WebSocket pusher and the system clock.
    pub fn in_memory(config: &ServerConfig) -> Self {
        let repository = Arc::new(InMemoryChatRepository::with_retention(
            config.effective_retention(),
        ));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        Self::new(
            repository,
            message_pusher,
            Arc::new(SystemClock),
            config,
        )
    }
}
