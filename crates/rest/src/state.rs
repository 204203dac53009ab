//! Per-table state for the REST handlers.
//!
//! Each registered table gets its own sub-router, and this module defines
//! the state those sub-routers carry: the table itself plus the shared
//! server configuration.

use std::sync::Arc;

use shelf_store::Table;

use crate::config::ApiConfig;

/// State handed to the handlers of one registered table.
///
/// The table is held as `Arc<dyn Table>`, so handlers are written once and
/// dispatch dynamically to whichever record type the table stores.
///
/// # Example
///
/// ```rust,ignore
/// use shelf_rest::{ApiConfig, ResourceState};
/// use shelf_store::MemoryTable;
/// use std::sync::Arc;
///
/// let table = Arc::new(MemoryTable::<Book>::ephemeral("books"));
/// let state = ResourceState::new(table, Arc::new(ApiConfig::default()));
/// ```
pub struct ResourceState {
    /// The table this state serves.
    table: Arc<dyn Table>,

    /// Server configuration, shared across all tables.
    config: Arc<ApiConfig>,
}

// Manually implement Clone since dyn Table is behind an Arc
impl Clone for ResourceState {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            config: Arc::clone(&self.config),
        }
    }
}

impl ResourceState {
    /// Creates the state for one table.
    pub fn new(table: Arc<dyn Table>, config: Arc<ApiConfig>) -> Self {
        Self { table, config }
    }

    /// The table's own name, as reported by [`Table::name`].
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Returns a reference to the table.
    pub fn table(&self) -> &dyn Table {
        self.table.as_ref()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Page size for listings without a page token.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }
}
