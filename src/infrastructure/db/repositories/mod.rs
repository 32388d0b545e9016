pub mod account_repository_sqlx;
pub mod bank_account_repository_sqlx;
pub mod financial_repository_sqlx;
pub mod investment_company_repository_sqlx;
pub mod lease_repository_sqlx;
pub mod mortgage_repository_sqlx;
pub mod notification_repository_sqlx;
pub mod owner_repository_sqlx;
pub mod ownership_repository_sqlx;
pub mod plot_info_repository_sqlx;
pub mod property_repository_sqlx;
pub mod tenant_repository_sqlx;
pub mod unit_repository_sqlx;
pub mod valuation_repository_sqlx;
