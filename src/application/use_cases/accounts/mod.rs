pub mod create_account;
pub mod list_accounts;
