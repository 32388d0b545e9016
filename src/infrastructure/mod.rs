pub mod db;
pub mod imports;
pub mod notifications;
