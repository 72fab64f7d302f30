pub mod types;
pub mod vector_store;
