use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::StoreError;
use crate::domain::account::models::Company;
use crate::domain::account::models::CredentialToken;
use crate::domain::account::models::EncodedLogin;
use crate::domain::account::models::Office;
use crate::domain::account::models::Role;
use crate::domain::account::models::RoleLink;
use crate::domain::account::models::User;
use crate::domain::account::ports::OrgDirectory;
use crate::domain::account::ports::UserStore;

/// Run the embedded schema migrations.
///
/// # Arguments
/// * `pool` - PostgreSQL connection pool
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn db_err(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn row_into_user(row: &PgRow) -> Result<User, StoreError> {
    let code: i16 = row.try_get("role").map_err(db_err)?;
    let role = Role::from_code(code)
        .ok_or_else(|| StoreError::Unavailable(format!("unknown role code {} in users", code)))?;

    Ok(User {
        id: row.try_get("id").map_err(db_err)?,
        login: EncodedLogin::new(row.try_get("login").map_err(db_err)?),
        credential: CredentialToken::new(row.try_get("credential").map_err(db_err)?),
        role,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, user: &User, link: Option<RoleLink>) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (login, credential, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.login.as_str())
        .bind(user.credential.as_str())
        .bind(user.role.code())
        .bind(user.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some("users_login_key")
                {
                    return StoreError::DuplicateLogin;
                }
            }
            db_err(e)
        })?;

        match link {
            Some(RoleLink::Worker { office_id }) => {
                sqlx::query(
                    r#"
                    INSERT INTO workers (user_id, office_id)
                    VALUES ($1, $2)
                    "#,
                )
                .bind(id)
                .bind(office_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            }
            Some(RoleLink::Office { office_id }) => {
                sqlx::query(
                    r#"
                    INSERT INTO office_members (user_id, office_id)
                    VALUES ($1, $2)
                    "#,
                )
                .bind(id)
                .bind(office_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            }
            None => {}
        }

        tx.commit().await.map_err(db_err)?;
        tracing::debug!(user_id = id, "user row committed");

        Ok(id)
    }

    async fn find_by_login(&self, login: &EncodedLogin) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, credential, role, created_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_into_user).transpose()
    }

    async fn exists(&self, login: &EncodedLogin) -> Result<bool, StoreError> {
        let present: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM users WHERE login = $1)
            "#,
        )
        .bind(login.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(present)
    }
}

pub struct PostgresOrgDirectory {
    pool: PgPool,
}

impl PostgresOrgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgDirectory for PostgresOrgDirectory {
    async fn find_office(&self, office_id: i64) -> Result<Option<Office>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, company_id
            FROM offices
            WHERE id = $1
            "#,
        )
        .bind(office_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|row| {
            Ok(Office {
                id: row.try_get("id").map_err(db_err)?,
                company_id: row.try_get("company_id").map_err(db_err)?,
            })
        })
        .transpose()
    }

    async fn find_company(&self, company_id: i64) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|row| {
            Ok(Company {
                id: row.try_get("id").map_err(db_err)?,
            })
        })
        .transpose()
    }
}
