use uuid::Uuid;

use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::{Account, AccountStatus};
use crate::domain::rules::non_blank;

pub struct CreateAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> CreateAccount<'a, R> {
    pub async fn execute(
        &self,
        id: Option<Uuid>,
        name: &str,
        status: Option<AccountStatus>,
    ) -> ServiceResult<Account> {
        non_blank(name, "name")?;
        let id = id.unwrap_or_else(Uuid::new_v4);
        if self.repo.find_by_id(id).await?.is_some() {
            return Err(ServiceError::conflict(format!("Account {id} already exists")));
        }
        let account = self
            .repo
            .create(id, name.trim(), status.unwrap_or(AccountStatus::Active))
            .await?;
        Ok(account)
    }
}
