use std::time::Duration;

use thiserror::Error;

/// Errors raised while exporting master data from the ERP.
#[derive(Debug, Error)]
pub enum ErpError {
    #[error("ERP did not answer within {0:?}")]
    Timeout(Duration),

    #[error("ERP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ERP returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed ERP export: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The ERP answered with an error line instead of an export.
    #[error("ERP rejected the export request: {0}")]
    Rejected(String),
}
