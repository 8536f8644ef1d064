use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}
