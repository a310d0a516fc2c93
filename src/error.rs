//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Analysis outcomes are not errors: the vision service reports those as
//! [`crate::models::AnalysisResult::Failure`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No image has been selected")]
    NoSelection,
}

pub type Result<T> = std::result::Result<T, Error>;
