use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::account::errors::StoreError;
use crate::domain::account::models::Company;
use crate::domain::account::models::EncodedLogin;
use crate::domain::account::models::Office;
use crate::domain::account::models::RoleLink;
use crate::domain::account::models::User;
use crate::domain::account::models::Worker;
use crate::domain::account::ports::OrgDirectory;
use crate::domain::account::ports::UserStore;

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    workers: Vec<Worker>,
    office_members: Vec<(i64, i64)>,
    offices: HashMap<i64, Office>,
    companies: HashMap<i64, Company>,
}

/// In-memory directory backend.
///
/// Single-lock substitute for the SQL stores: the uniqueness check and the
/// user/link inserts happen under one lock acquisition, which makes `create`
/// atomic and serializes concurrent registrations the way the database
/// unique constraint does.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: Mutex<State>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("directory state poisoned")
    }

    /// Seed a company row.
    pub fn add_company(&self, id: i64) {
        self.state().companies.insert(id, Company { id });
    }

    /// Seed an office row inside a company.
    pub fn add_office(&self, id: i64, company_id: i64) {
        self.state().offices.insert(id, Office { id, company_id });
    }

    /// Number of user rows currently stored.
    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    /// Office a worker link points at, if any.
    pub fn worker_office(&self, user_id: i64) -> Option<i64> {
        self.state()
            .workers
            .iter()
            .find(|worker| worker.user_id == user_id)
            .map(|worker| worker.office_id)
    }

    /// Office an office-member link points at, if any.
    pub fn member_office(&self, user_id: i64) -> Option<i64> {
        self.state()
            .office_members
            .iter()
            .find(|(member_id, _)| *member_id == user_id)
            .map(|(_, office_id)| *office_id)
    }
}

#[async_trait]
impl UserStore for InMemoryDirectory {
    async fn create(&self, user: &User, link: Option<RoleLink>) -> Result<i64, StoreError> {
        let mut state = self.state();

        if state.users.iter().any(|stored| stored.login == user.login) {
            return Err(StoreError::DuplicateLogin);
        }

        state.next_id += 1;
        let id = state.next_id;

        let mut stored = user.clone();
        stored.id = id;
        state.users.push(stored);

        match link {
            Some(RoleLink::Worker { office_id }) => state.workers.push(Worker {
                user_id: id,
                office_id,
            }),
            Some(RoleLink::Office { office_id }) => state.office_members.push((id, office_id)),
            None => {}
        }

        Ok(id)
    }

    async fn find_by_login(&self, login: &EncodedLogin) -> Result<Option<User>, StoreError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|user| user.login == *login)
            .cloned())
    }

    async fn exists(&self, login: &EncodedLogin) -> Result<bool, StoreError> {
        Ok(self.state().users.iter().any(|user| user.login == *login))
    }
}

#[async_trait]
impl OrgDirectory for InMemoryDirectory {
    async fn find_office(&self, office_id: i64) -> Result<Option<Office>, StoreError> {
        Ok(self.state().offices.get(&office_id).copied())
    }

    async fn find_company(&self, company_id: i64) -> Result<Option<Company>, StoreError> {
        Ok(self.state().companies.get(&company_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::models::CredentialToken;
    use crate::domain::account::models::Role;

    fn user(login: &str) -> User {
        User::unsaved(
            EncodedLogin::new(login.to_string()),
            CredentialToken::new(format!("cred-{}", login)),
            Role::Worker,
        )
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryDirectory::new();

        let first = store.create(&user("a"), None).await.unwrap();
        let second = store.create(&user("b"), None).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_login() {
        let store = InMemoryDirectory::new();

        store.create(&user("a"), None).await.unwrap();
        let result = store.create(&user("a"), None).await;

        assert!(matches!(result.unwrap_err(), StoreError::DuplicateLogin));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_create_writes_link_with_user() {
        let store = InMemoryDirectory::new();

        let id = store
            .create(&user("a"), Some(RoleLink::Worker { office_id: 7 }))
            .await
            .unwrap();

        assert_eq!(store.worker_office(id), Some(7));
    }
}
