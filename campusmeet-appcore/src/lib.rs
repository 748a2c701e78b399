pub mod call_service;
pub mod config_store;
pub mod service;
