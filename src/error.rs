use std::io;

use thiserror::Error;

/// Failures that stop a lead table from being loaded, scored or exported.
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead table is missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("malformed lead table: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse scoring config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LeadError>;
