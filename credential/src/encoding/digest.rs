use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;

use super::errors::EncodingError;

type HmacSha256 = Hmac<Sha256>;

// Domain separation for identity digests, so an encoded login can never
// collide with a digest computed elsewhere over the same bytes.
const IDENTITY_TAG: &[u8] = b"directory/identity/v1:";

/// Deterministic login and credential encoder.
///
/// Produces the opaque identifiers the directory stores and compares
/// (internally SHA-256 for identities, HMAC-SHA-256 for credentials).
pub struct CredentialEncoder;

impl CredentialEncoder {
    /// Create a new encoder instance.
    ///
    /// # Returns
    /// CredentialEncoder instance
    pub fn new() -> Self {
        Self
    }

    /// Encode a login into its stable opaque identifier.
    ///
    /// The same login always yields the same identifier, and the login
    /// cannot be recovered from it.
    ///
    /// # Arguments
    /// * `login` - Plaintext login
    ///
    /// # Returns
    /// Hex-encoded identity digest
    ///
    /// # Errors
    /// * `EmptyLogin` - Login is empty
    pub fn encode_identity(&self, login: &str) -> Result<String, EncodingError> {
        if login.is_empty() {
            return Err(EncodingError::EmptyLogin);
        }

        let mut hasher = Sha256::new();
        hasher.update(IDENTITY_TAG);
        hasher.update(login.as_bytes());

        Ok(hex::encode(hasher.finalize()))
    }

    /// Encode a (login, password) pair into a stable opaque token.
    ///
    /// The login keys the digest, so the same password under two different
    /// logins yields two unrelated tokens.
    ///
    /// # Arguments
    /// * `login` - Plaintext login
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hex-encoded credential token
    ///
    /// # Errors
    /// * `EmptyLogin` - Login is empty
    /// * `EmptyPassword` - Password is empty
    pub fn encode_credential(&self, login: &str, password: &str) -> Result<String, EncodingError> {
        if login.is_empty() {
            return Err(EncodingError::EmptyLogin);
        }
        if password.is_empty() {
            return Err(EncodingError::EmptyPassword);
        }

        let mut mac =
            HmacSha256::new_from_slice(login.as_bytes()).expect("HMAC can take key of any size");
        mac.update(password.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Default for CredentialEncoder {
    fn default() -> Self {
        Self::new()
    }
}
