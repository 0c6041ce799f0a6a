use std::sync::Arc;

use credential::CredentialEncoder;
use directory_service::domain::account::models::EncodedLogin;
use directory_service::domain::account::registry::DirectoryRegistry;
use directory_service::domain::account::service::AuthManager;
use directory_service::outbound::stores::InMemoryDirectory;

pub type TestRegistry = DirectoryRegistry<InMemoryDirectory, InMemoryDirectory>;

/// Test harness wiring the auth manager to the in-memory backend and the
/// real credential encoder.
pub struct TestDirectory {
    pub manager: AuthManager<CredentialEncoder, TestRegistry>,
    pub registry: Arc<TestRegistry>,
    pub store: Arc<InMemoryDirectory>,
}

impl TestDirectory {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryDirectory::new());
        let registry = Arc::new(DirectoryRegistry::new(
            Arc::clone(&store),
            Arc::clone(&store),
        ));
        let manager = AuthManager::new(Arc::new(CredentialEncoder::new()), Arc::clone(&registry));

        Self {
            manager,
            registry,
            store,
        }
    }

    /// Harness with office `office_id` seeded inside company `company_id`.
    pub fn with_office(office_id: i64, company_id: i64) -> Self {
        let directory = Self::new();
        directory.store.add_company(company_id);
        directory.store.add_office(office_id, company_id);
        directory
    }
}

/// Encode a login the way the wired codec does, for store-level assertions.
pub fn encoded_login(login: &str) -> EncodedLogin {
    let encoder = CredentialEncoder::new();
    EncodedLogin::new(
        encoder
            .encode_identity(login)
            .expect("Failed to encode login"),
    )
}
