pub mod history_store;
