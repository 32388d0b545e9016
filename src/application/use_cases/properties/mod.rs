pub mod manage_properties;
pub mod portfolio;
