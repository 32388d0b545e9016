pub mod manage_valuations;
