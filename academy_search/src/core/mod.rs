// Searchable resources and the HTTP surface they are served through

pub mod handlers;
pub mod search_operations;
pub mod traits;

// Re-export commonly used items
pub use handlers::{SearchState, search_handler, search_resource};
pub use traits::SearchResource;
