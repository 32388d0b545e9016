use crate::application::errors::ServiceResult;
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::Account;

pub struct ListAccounts<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> ListAccounts<'a, R> {
    pub async fn execute(&self) -> ServiceResult<Vec<Account>> {
        Ok(self.repo.list().await?)
    }
}
