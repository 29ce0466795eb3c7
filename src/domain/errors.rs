//! Domain Errors

use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("\"{type_name}\" is not supported")]
    UnsupportedInputType { type_name: &'static str },
    #[error("String is not a valid HTTP request")]
    InvalidRequestFormat {
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl CompareError {
    pub(crate) fn invalid_format(report: eyre::Report) -> Self {
        Self::InvalidRequestFormat {
            source: report.into(),
        }
    }
}
