pub mod dashboard;
pub mod financials;
pub mod imports;
pub mod investment_companies;
pub mod leases;
pub mod matching;
pub mod mortgages;
pub mod notifications;
pub mod owners;
pub mod pagination;
pub mod properties;
pub mod tenants;
pub mod units;
