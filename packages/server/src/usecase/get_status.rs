//! UseCase: サーバー状態の取得（読み取り専用）

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::domain::{ChatRepository, Username};

/// Registry と Log のスナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub users: Vec<Username>,
    pub total_messages: usize,
    pub uptime: Duration,
}

/// 状態取得のユースケース
pub struct GetStatusUseCase {
    repository: Arc<dyn ChatRepository>,
    started_at: Instant,
}

impl GetStatusUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            repository,
            started_at: Instant::now(),
        }
    }

    pub async fn execute(&self) -> StatusSnapshot {
        StatusSnapshot {
            users: self.repository.online_usernames().await,
            total_messages: self.repository.total_messages().await,
            uptime: self.started_at.elapsed(),
        }
    }
}
