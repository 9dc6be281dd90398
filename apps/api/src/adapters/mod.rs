pub mod http;
pub mod persistence;
pub mod table_store;
