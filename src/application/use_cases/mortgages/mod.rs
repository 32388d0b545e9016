pub mod manage_mortgages;
pub mod payments;
