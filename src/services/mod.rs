pub mod export_service;
pub mod search_service;
pub mod session_service;
pub mod tree_converter;
pub mod tree_service;
pub mod tree_store;
