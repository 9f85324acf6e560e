pub mod file_data;
pub mod search;
pub mod session;
pub mod tree_node;
pub mod upload;
