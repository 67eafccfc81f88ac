use std::sync::Arc;

use crate::{
    application::{
        dto::AccountDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::account::{AccountId, AccountRepository},
};
use uuid::Uuid;

pub struct AccountProfileQuery {
    pub user_id: Uuid,
}

pub struct AccountProfile {
    account_repo: Arc<dyn AccountRepository>,
}

impl AccountProfile {
    pub fn new(account_repo: Arc<dyn AccountRepository>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, query: AccountProfileQuery) -> ApplicationResult<AccountDto> {
        let account_id = AccountId::new(query.user_id)?;

        let account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(ApplicationError::AccountNotFoundById)?;

        Ok(account.into())
    }
}
