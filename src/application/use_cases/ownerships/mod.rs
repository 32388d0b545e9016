pub mod manage_ownerships;
