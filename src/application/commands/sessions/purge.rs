use std::sync::Arc;

use crate::{
    application::{error::ApplicationResult, ports::time::Clock},
    domain::refresh_token::RefreshTokenRepository,
};
use tracing::info;

/// Housekeeping for refresh tokens that expired without being rotated.
/// Tokens are still valid at their exact expiry instant, so only records
/// expiring strictly before now are removed.
pub struct ExpiredTokenPurge {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    clock: Arc<dyn Clock>,
}

impl ExpiredTokenPurge {
    pub fn new(refresh_token_repo: Arc<dyn RefreshTokenRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            refresh_token_repo,
            clock,
        }
    }

    pub async fn execute(&self) -> ApplicationResult<u64> {
        let removed = self
            .refresh_token_repo
            .delete_expired(self.clock.now())
            .await?;

        if removed > 0 {
            info!(removed, "purged expired refresh tokens");
        }

        Ok(removed)
    }
}
