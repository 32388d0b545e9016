pub mod text_enum;

pub mod accounts;
pub mod bank_accounts;
pub mod dashboard;
pub mod financials;
pub mod imports;
pub mod investment_companies;
pub mod leases;
pub mod matching;
pub mod money;
pub mod mortgages;
pub mod notifications;
pub mod owners;
pub mod ownerships;
pub mod patch;
pub mod plot_info;
pub mod properties;
pub mod rules;
pub mod tenants;
pub mod units;
pub mod valuations;
