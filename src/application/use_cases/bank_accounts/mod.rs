pub mod manage_bank_accounts;
