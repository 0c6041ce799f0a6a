pub mod digest;
pub mod errors;

pub use digest::CredentialEncoder;
pub use errors::EncodingError;
