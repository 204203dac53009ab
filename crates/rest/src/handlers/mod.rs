//! HTTP request handlers for the generated table routes.
//!
//! This module contains one handler per route shape:
//!
//! - [`list`] - First page of a table
//! - [`view`] - Read a record by key
//! - [`search`] - Filtered, paged scan of a table
//! - [`create`] - Create a new record
//! - [`update`] - Merge fields into an existing record
//! - [`delete`] - Delete a record

pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod update;
pub mod view;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use list::list_handler;
pub use search::search_handler;
pub use update::update_handler;
pub use view::view_handler;
