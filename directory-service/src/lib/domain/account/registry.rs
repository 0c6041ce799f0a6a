use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::RegistryError;
use crate::account::errors::StoreError;
use crate::domain::account::models::CredentialToken;
use crate::domain::account::models::EncodedLogin;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleLink;
use crate::domain::account::models::User;
use crate::domain::account::ports::AccountRegistry;
use crate::domain::account::ports::OrgDirectory;
use crate::domain::account::ports::UserStore;

/// Persistence-facing registry over the narrow store ports.
///
/// Validates role-specific preconditions before any write and hands the
/// user-plus-link insert to the user store as one atomic unit.
pub struct DirectoryRegistry<US, OD>
where
    US: UserStore,
    OD: OrgDirectory,
{
    users: Arc<US>,
    directory: Arc<OD>,
}

impl<US, OD> DirectoryRegistry<US, OD>
where
    US: UserStore,
    OD: OrgDirectory,
{
    /// Create a new registry with injected store capabilities.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `directory` - Office/company lookup implementation
    ///
    /// # Returns
    /// Configured registry instance
    pub fn new(users: Arc<US>, directory: Arc<OD>) -> Self {
        Self { users, directory }
    }

    /// Resolve the role link for a registration, validating the
    /// organizational references the role calls for.
    async fn role_link(
        &self,
        role: Role,
        office_id: Option<i64>,
        company_id: Option<i64>,
    ) -> Result<Option<RoleLink>, RegistryError> {
        match role {
            // An unassigned worker carries no link; the office reference is
            // recorded as given, without validation.
            Role::Worker => Ok(office_id.map(|office_id| RoleLink::Worker { office_id })),
            Role::Office => {
                let (office_id, company_id) = match (office_id, company_id) {
                    (Some(office_id), Some(company_id)) => (office_id, company_id),
                    _ => return Err(RegistryError::MissingOrgReference),
                };

                let office = self.directory.find_office(office_id).await?;
                let company = self.directory.find_company(company_id).await?;

                let resolves = match (office, company) {
                    (Some(office), Some(company)) => office.company_id == company.id,
                    _ => false,
                };
                if !resolves {
                    tracing::warn!(
                        office_id,
                        company_id,
                        "office registration rejected, references do not resolve"
                    );
                    return Err(RegistryError::InvalidRelationship {
                        office_id,
                        company_id,
                    });
                }

                Ok(Some(RoleLink::Office { office_id }))
            }
            Role::Company | Role::Admin => Ok(None),
        }
    }
}

#[async_trait]
impl<US, OD> AccountRegistry for DirectoryRegistry<US, OD>
where
    US: UserStore,
    OD: OrgDirectory,
{
    async fn is_registered(&self, login: &EncodedLogin) -> Result<bool, RegistryError> {
        Ok(self.users.exists(login).await?)
    }

    async fn create_user(
        &self,
        user: User,
        office_id: Option<i64>,
        company_id: Option<i64>,
    ) -> Result<bool, RegistryError> {
        // All validation happens before any write.
        let link = self.role_link(user.role, office_id, company_id).await?;

        match self.users.create(&user, link).await {
            Ok(id) => {
                tracing::debug!(user_id = id, role = %user.role, "user created");
                Ok(true)
            }
            // Lost the race or the pre-check was stale: a normal negative
            // outcome, not a failure.
            Err(StoreError::DuplicateLogin) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn verify(
        &self,
        login: &EncodedLogin,
        credential: &CredentialToken,
    ) -> Result<Option<i64>, RegistryError> {
        let user = self.users.find_by_login(login).await?;

        Ok(user
            .filter(|user| user.credential == *credential)
            .map(|user| user.id))
    }
}
