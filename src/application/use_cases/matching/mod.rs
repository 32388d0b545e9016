pub mod match_addresses;
