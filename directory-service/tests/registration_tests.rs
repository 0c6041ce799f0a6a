mod common;

use std::sync::Arc;

use common::encoded_login;
use common::TestDirectory;
use credential::EncodingError;
use directory_service::domain::account::errors::AuthError;
use directory_service::domain::account::errors::RegistryError;
use directory_service::domain::account::models::RegisterCommand;
use directory_service::domain::account::models::Role;
use directory_service::domain::account::ports::AccountRegistry;
use directory_service::domain::account::ports::UserStore;

#[tokio::test]
async fn test_register_new_login_succeeds() {
    let directory = TestDirectory::new();

    let created = directory
        .manager
        .register(RegisterCommand::new("NewUser", "SomePassword"))
        .await
        .expect("Failed to register");

    assert!(created);
    assert_eq!(directory.store.user_count(), 1);
    assert!(directory
        .registry
        .is_registered(&encoded_login("NewUser"))
        .await
        .expect("Failed to check registration"));
}

#[tokio::test]
async fn test_register_then_verify_returns_assigned_account() {
    let directory = TestDirectory::new();

    directory
        .manager
        .register(RegisterCommand::new("NewUser", "SomePassword"))
        .await
        .expect("Failed to register");

    let account = directory
        .manager
        .verify("NewUser", "SomePassword")
        .await
        .expect("Failed to verify");

    let stored = directory
        .store
        .find_by_login(&encoded_login("NewUser"))
        .await
        .expect("Failed to read store")
        .expect("User row missing");
    assert_eq!(account, Some(stored.id));
}

#[tokio::test]
async fn test_register_duplicate_login_rejected_and_credential_unchanged() {
    let directory = TestDirectory::new();

    let first = directory
        .manager
        .register(RegisterCommand::new("ExistingUser", "OriginalPassword"))
        .await
        .expect("Failed to register");
    let second = directory
        .manager
        .register(RegisterCommand::new("ExistingUser", "OtherPassword"))
        .await
        .expect("Failed to register");

    assert!(first);
    assert!(!second);
    assert_eq!(directory.store.user_count(), 1);

    // The original credential still verifies; the rejected one never took.
    let original = directory
        .manager
        .verify("ExistingUser", "OriginalPassword")
        .await
        .expect("Failed to verify");
    let rejected = directory
        .manager
        .verify("ExistingUser", "OtherPassword")
        .await
        .expect("Failed to verify");
    assert!(original.is_some());
    assert_eq!(rejected, None);
}

#[tokio::test]
async fn test_verify_wrong_password_is_absence() {
    let directory = TestDirectory::new();

    directory
        .manager
        .register(RegisterCommand::new("NewUser", "SomePassword"))
        .await
        .expect("Failed to register");

    let account = directory
        .manager
        .verify("NewUser", "WrongPassword")
        .await
        .expect("Failed to verify");

    assert_eq!(account, None);
}

#[tokio::test]
async fn test_verify_unknown_login_is_absence() {
    let directory = TestDirectory::new();

    let account = directory
        .manager
        .verify("NoSuchUser", "SomePassword")
        .await
        .expect("Failed to verify");

    assert_eq!(account, None);
}

#[tokio::test]
async fn test_register_without_role_defaults_to_worker() {
    let directory = TestDirectory::new();

    directory
        .manager
        .register(RegisterCommand::new("NewUser", "SomePassword"))
        .await
        .expect("Failed to register");

    let stored = directory
        .store
        .find_by_login(&encoded_login("NewUser"))
        .await
        .expect("Failed to read store")
        .expect("User row missing");
    assert_eq!(stored.role, Role::Worker);
}

#[tokio::test]
async fn test_worker_registration_records_office_link() {
    let directory = TestDirectory::new();

    let created = directory
        .manager
        .register(
            RegisterCommand::new("WorkerUser", "SomePassword")
                .with_role(Role::Worker)
                .with_office_id(7),
        )
        .await
        .expect("Failed to register");

    assert!(created);
    let stored = directory
        .store
        .find_by_login(&encoded_login("WorkerUser"))
        .await
        .expect("Failed to read store")
        .expect("User row missing");
    assert_eq!(directory.store.worker_office(stored.id), Some(7));
}

#[tokio::test]
async fn test_office_registration_with_matching_company() {
    let directory = TestDirectory::with_office(1, 2);

    let created = directory
        .manager
        .register(
            RegisterCommand::new("OfficeUser", "SomePassword")
                .with_role(Role::Office)
                .with_office_id(1)
                .with_company_id(2),
        )
        .await
        .expect("Failed to register");

    assert!(created);
    let stored = directory
        .store
        .find_by_login(&encoded_login("OfficeUser"))
        .await
        .expect("Failed to read store")
        .expect("User row missing");
    assert_eq!(stored.role, Role::Office);
    assert_eq!(directory.store.member_office(stored.id), Some(1));
}

#[tokio::test]
async fn test_office_registration_with_wrong_company_persists_nothing() {
    let directory = TestDirectory::with_office(1, 2);

    let result = directory
        .manager
        .register(
            RegisterCommand::new("OfficeUser", "SomePassword")
                .with_role(Role::Office)
                .with_office_id(1)
                .with_company_id(3),
        )
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AuthError::Registry(RegistryError::InvalidRelationship {
            office_id: 1,
            company_id: 3
        })
    ));
    assert_eq!(directory.store.user_count(), 0);
    assert!(!directory
        .registry
        .is_registered(&encoded_login("OfficeUser"))
        .await
        .expect("Failed to check registration"));
}

#[tokio::test]
async fn test_office_registration_requires_both_references() {
    let directory = TestDirectory::with_office(1, 2);

    let result = directory
        .manager
        .register(
            RegisterCommand::new("OfficeUser", "SomePassword")
                .with_role(Role::Office)
                .with_office_id(1),
        )
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AuthError::Registry(RegistryError::MissingOrgReference)
    ));
    assert_eq!(directory.store.user_count(), 0);
}

#[tokio::test]
async fn test_register_empty_password_rejected() {
    let directory = TestDirectory::new();

    let result = directory
        .manager
        .register(RegisterCommand::new("NewUser", ""))
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AuthError::Encoding(EncodingError::EmptyPassword)
    ));
    assert_eq!(directory.store.user_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_registrations_have_a_single_winner() {
    let directory = TestDirectory::new();
    let manager = Arc::new(directory.manager);
    let store = directory.store;

    let first = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            manager
                .register(RegisterCommand::new("RacingUser", "FirstPassword"))
                .await
        })
    };
    let second = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            manager
                .register(RegisterCommand::new("RacingUser", "SecondPassword"))
                .await
        })
    };

    let first = first.await.expect("task panicked").expect("Failed to register");
    let second = second.await.expect("task panicked").expect("Failed to register");

    assert_ne!(first, second, "exactly one concurrent registration may win");
    assert_eq!(store.user_count(), 1);
}
