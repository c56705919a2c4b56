use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServingError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}
