use std::sync::Arc;

use crate::account::errors::AuthError;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::User;
use crate::domain::account::ports::AccountRegistry;
use crate::domain::account::ports::CredentialCodec;

/// Orchestrates registration and credential verification.
///
/// Holds no state and performs no persistence or cryptography of its own:
/// it coordinates the codec and the registry and applies policy (a login
/// collision rejects the registration before anything is written).
pub struct AuthManager<C, R>
where
    C: CredentialCodec,
    R: AccountRegistry,
{
    codec: Arc<C>,
    registry: Arc<R>,
}

impl<C, R> AuthManager<C, R>
where
    C: CredentialCodec,
    R: AccountRegistry,
{
    /// Create a new manager with injected dependencies.
    ///
    /// # Arguments
    /// * `codec` - Credential transformation implementation
    /// * `registry` - Account registry implementation
    ///
    /// # Returns
    /// Configured manager instance
    pub fn new(codec: Arc<C>, registry: Arc<R>) -> Self {
        Self { codec, registry }
    }

    /// Register a new account.
    ///
    /// A registration without a role is scoped to Worker.
    ///
    /// # Returns
    /// True when the account was created; false when the login is taken
    ///
    /// # Errors
    /// * `Encoding` - Empty login or password
    /// * `Registry` - Invalid organizational references or store failure
    pub async fn register(&self, command: RegisterCommand) -> Result<bool, AuthError> {
        let login = self.codec.encode_identity(&command.login)?;

        // The collision check comes first so a taken login costs no
        // credential encoding and no create attempt.
        if self.registry.is_registered(&login).await? {
            tracing::debug!("registration rejected, login already taken");
            return Ok(false);
        }

        let credential = self
            .codec
            .encode_credential(&command.login, &command.password)?;
        let role = command.role.unwrap_or(Role::Worker);
        let user = User::unsaved(login, credential, role);

        let created = self
            .registry
            .create_user(user, command.office_id, command.company_id)
            .await?;
        Ok(created)
    }

    /// Verify a login / password pair.
    ///
    /// Unknown login and wrong password are indistinguishable here; both
    /// come back as `None`.
    ///
    /// # Returns
    /// The account identifier, or None when the credentials do not match
    ///
    /// # Errors
    /// * `Encoding` - Empty login or password
    /// * `Registry` - Store failure
    pub async fn verify(&self, login: &str, password: &str) -> Result<Option<i64>, AuthError> {
        let encoded_login = self.codec.encode_identity(login)?;
        let credential = self.codec.encode_credential(login, password)?;

        let account = self.registry.verify(&encoded_login, &credential).await?;
        Ok(account)
    }
}
