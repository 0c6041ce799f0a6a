use thiserror::Error;

/// Error type for credential encoding operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("login must not be empty")]
    EmptyLogin,

    #[error("password must not be empty")]
    EmptyPassword,
}
