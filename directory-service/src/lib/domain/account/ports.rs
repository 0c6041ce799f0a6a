use async_trait::async_trait;
use credential::CredentialEncoder;
use credential::EncodingError;

use crate::account::errors::RegistryError;
use crate::account::errors::StoreError;
use crate::domain::account::models::Company;
use crate::domain::account::models::CredentialToken;
use crate::domain::account::models::EncodedLogin;
use crate::domain::account::models::Office;
use crate::domain::account::models::RoleLink;
use crate::domain::account::models::User;

/// Port for the credential transformation capability.
///
/// Both operations are pure and deterministic: the same inputs always yield
/// the same outputs, and neither output is reversible.
pub trait CredentialCodec: Send + Sync + 'static {
    /// Transform a plaintext login into its stable opaque identifier.
    ///
    /// # Errors
    /// * `EmptyLogin` - Login is empty
    fn encode_identity(&self, login: &str) -> Result<EncodedLogin, EncodingError>;

    /// Transform a (login, password) pair into a stable opaque token.
    ///
    /// # Errors
    /// * `EmptyLogin` - Login is empty
    /// * `EmptyPassword` - Password is empty
    fn encode_credential(
        &self,
        login: &str,
        password: &str,
    ) -> Result<CredentialToken, EncodingError>;
}

impl CredentialCodec for CredentialEncoder {
    fn encode_identity(&self, login: &str) -> Result<EncodedLogin, EncodingError> {
        CredentialEncoder::encode_identity(self, login).map(EncodedLogin::new)
    }

    fn encode_credential(
        &self,
        login: &str,
        password: &str,
    ) -> Result<CredentialToken, EncodingError> {
        CredentialEncoder::encode_credential(self, login, password).map(CredentialToken::new)
    }
}

/// Port for account registry operations.
///
/// Every operation works on already-encoded values; the registry never sees
/// a plaintext login or password.
#[async_trait]
pub trait AccountRegistry: Send + Sync + 'static {
    /// Whether a user with this encoded login exists.
    ///
    /// Side-effect free.
    ///
    /// # Errors
    /// * `Persistence` - Store unavailable
    async fn is_registered(&self, login: &EncodedLogin) -> Result<bool, RegistryError>;

    /// Validate role preconditions and persist the user plus its role link.
    ///
    /// The user row and the link row are written as one atomic unit; nothing
    /// persists when validation or either write fails.
    ///
    /// # Arguments
    /// * `user` - User carrying the unassigned-identifier sentinel
    /// * `office_id` - Office reference, where the role calls for one
    /// * `company_id` - Company reference, where the role calls for one
    ///
    /// # Returns
    /// True on success; false when the encoded login is already taken
    ///
    /// # Errors
    /// * `MissingOrgReference` - Office registration without both references
    /// * `InvalidRelationship` - Office/company references do not resolve
    /// * `Persistence` - Store unavailable
    async fn create_user(
        &self,
        user: User,
        office_id: Option<i64>,
        company_id: Option<i64>,
    ) -> Result<bool, RegistryError>;

    /// Look up the account for an encoded login / credential pair.
    ///
    /// Unknown login and credential mismatch both collapse to `None`; the
    /// caller cannot tell them apart.
    ///
    /// # Returns
    /// The account identifier, or None
    ///
    /// # Errors
    /// * `Persistence` - Store unavailable
    async fn verify(
        &self,
        login: &EncodedLogin,
        credential: &CredentialToken,
    ) -> Result<Option<i64>, RegistryError>;
}

/// Persistence port for user rows and their role links.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Atomically persist a user row and, when present, its role link.
    ///
    /// Implementations must enforce encoded-login uniqueness inside the same
    /// atomic unit as the insert, and must not leave a user row behind when
    /// the link write fails.
    ///
    /// # Returns
    /// The identifier assigned to the new user
    ///
    /// # Errors
    /// * `DuplicateLogin` - Encoded login already stored
    /// * `Unavailable` - Store failure
    async fn create(&self, user: &User, link: Option<RoleLink>) -> Result<i64, StoreError>;

    /// Retrieve a user row by encoded login.
    ///
    /// # Errors
    /// * `Unavailable` - Store failure
    async fn find_by_login(&self, login: &EncodedLogin) -> Result<Option<User>, StoreError>;

    /// Whether a user row with this encoded login exists.
    ///
    /// # Errors
    /// * `Unavailable` - Store failure
    async fn exists(&self, login: &EncodedLogin) -> Result<bool, StoreError>;
}

/// Read-only lookup port for the office/company directory.
#[async_trait]
pub trait OrgDirectory: Send + Sync + 'static {
    /// Retrieve an office by identifier.
    ///
    /// # Errors
    /// * `Unavailable` - Store failure
    async fn find_office(&self, office_id: i64) -> Result<Option<Office>, StoreError>;

    /// Retrieve a company by identifier.
    ///
    /// # Errors
    /// * `Unavailable` - Store failure
    async fn find_company(&self, company_id: i64) -> Result<Option<Company>, StoreError>;
}
