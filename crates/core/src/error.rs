//! Error types

use thiserror::Error;

/// Pipeline errors
///
/// Only model-code parsing can fail. Every later stage is total and degrades
/// to safe defaults instead of returning an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("MODEL_INPUT_EMPTY")]
    ModelInputEmpty,

    #[error("MODEL_CODE_NOT_IDENTIFIED")]
    ModelCodeNotIdentified,

    /// Raised only when the pipeline runs with known-series enforcement on
    #[error("SERIES_CODE_NOT_IDENTIFIED")]
    SeriesCodeNotIdentified,
}

impl Error {
    /// Stable wire code for HTTP and batch responses
    pub fn code(&self) -> &'static str {
        match self {
            Error::ModelInputEmpty => "MODEL_INPUT_EMPTY",
            Error::ModelCodeNotIdentified => "MODEL_CODE_NOT_IDENTIFIED",
            Error::SeriesCodeNotIdentified => "SERIES_CODE_NOT_IDENTIFIED",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
