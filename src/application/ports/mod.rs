pub mod account_repository;
pub mod bank_account_repository;
pub mod financial_repository;
pub mod import_history_store;
pub mod investment_company_repository;
pub mod lease_repository;
pub mod mortgage_repository;
pub mod notification_repository;
pub mod notification_sender;
pub mod owner_repository;
pub mod ownership_repository;
pub mod plot_info_repository;
pub mod property_repository;
pub mod tenant_repository;
pub mod unit_repository;
pub mod valuation_repository;
