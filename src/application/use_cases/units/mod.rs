pub mod manage_units;
