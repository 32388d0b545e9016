pub mod ledger;
pub mod reports;
