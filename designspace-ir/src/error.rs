use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("lib key '{key}' should hold {expected}")]
    UnexpectedLibValue { key: String, expected: &'static str },
}
