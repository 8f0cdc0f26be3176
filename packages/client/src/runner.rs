//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
///
/// # Errors
///
/// Returns the last error when the login is rejected or every reconnection
/// attempt has failed.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS + 1
        );

        let error = match run_client_session(&url, &username).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the user ended the session, don't reconnect
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&error) {
            tracing::error!("Cannot log in as '{}'. Exiting.", username);
            return Err(error);
        }

        tracing::warn!("{}", error);
        if !should_attempt_reconnect(&error, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(error);
        }
        reconnect_count += 1;

        tracing::info!(
            "Reconnecting in {} seconds... ({}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
