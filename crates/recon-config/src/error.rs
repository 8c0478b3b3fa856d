use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to parse, or a value has the wrong type.
    #[error("failed to load recon config: {0}")]
    Load(#[from] figment::Error),

    /// The Books organisation or OAuth credentials are incomplete.
    #[error("books credentials incomplete, missing: {}", missing.join(", "))]
    BooksUnconfigured { missing: Vec<&'static str> },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
