use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Read-only view of the externally owned menu item catalog.
#[cfg_attr(test, mockall::automock)]
pub trait MenuItemRepository: Send + Sync {
    /// Ids of every menu item currently flagged as available.
    fn list_available_ids(&self) -> impl Future<Output = Result<Vec<i64>, CoreError>> + Send;
}
