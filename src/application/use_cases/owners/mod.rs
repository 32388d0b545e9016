pub mod manage_owners;
