pub mod manage_tenants;
