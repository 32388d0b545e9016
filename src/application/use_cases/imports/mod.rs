pub mod history;
pub mod rows;
pub mod run_import;
