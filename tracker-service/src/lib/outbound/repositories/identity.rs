use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::Login;
use crate::identity::ports::CredentialStore;

/// Credential store backed by Postgres.
///
/// Login uniqueness lives in the `identities_login_key` constraint so a
/// concurrent duplicate registration fails inside the insert itself.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> IdentityError {
    IdentityError::Database(e.to_string())
}

fn row_to_identity(row: &PgRow) -> Result<Identity, IdentityError> {
    let id: i64 = row.try_get("id").map_err(db_err)?;
    let login: String = row.try_get("login").map_err(db_err)?;
    let password_hash: String = row.try_get("password_hash").map_err(db_err)?;
    let role_code: i16 = row.try_get("role").map_err(db_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_err)?;

    let role = u8::try_from(role_code)
        .ok()
        .and_then(|code| Role::try_from(code).ok())
        .ok_or_else(|| {
            IdentityError::Database(format!("invalid role code {} for identity {}", role_code, id))
        })?;

    Ok(Identity {
        id,
        login: Login::new(&login)?,
        password_hash,
        role,
        created_at,
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(
        &self,
        login: &Login,
        password_hash: &str,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        let row = sqlx::query(
            r#"
            INSERT INTO identities (login, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, login, password_hash, role, created_at
            "#,
        )
        .bind(login.as_str())
        .bind(password_hash)
        .bind(i16::from(u8::from(role)))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some("identities_login_key")
                {
                    return IdentityError::LoginTaken(login.to_string());
                }
            }
            db_err(e)
        })?;

        row_to_identity(&row)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, password_hash, role, created_at
            FROM identities
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_identity).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, login, password_hash, role, created_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_identity).transpose()
    }

    async fn update_password_hash(&self, id: i64, new_hash: &str) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET password_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(new_hash)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id));
        }

        Ok(())
    }
}
