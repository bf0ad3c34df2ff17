//! Error types shared by the widgets.

use domlet::SurfaceError;

use crate::source::FetchError;

/// Errors returned by widget operations.
///
/// Every variant is recoverable: the widget that returned it is left in a
/// consistent state and keeps working.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Sort requested on an unknown or non-sortable column.
    #[error("Column '{0}' is not sortable")]
    InvalidColumn(String),

    /// Operation invoked while its precondition does not hold.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// The data source failed to deliver a page.
    #[error("Data source failure: {0}")]
    DataSource(#[from] FetchError),

    /// The addressed item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The render surface rejected an update.
    #[error("Render surface error: {0}")]
    Surface(#[from] SurfaceError),
}

pub type Result<T> = std::result::Result<T, Error>;
