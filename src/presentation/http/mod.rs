pub mod account;
pub mod accounts;
pub mod bank_accounts;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod financials;
pub mod health;
pub mod imports;
pub mod investment_companies;
pub mod leases;
pub mod matching;
pub mod mortgages;
pub mod notifications;
pub mod owners;
pub mod ownerships;
pub mod params;
pub mod plot_info;
pub mod properties;
pub mod tenants;
pub mod units;
pub mod valuations;
