use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::principal::errors::IdentityError;
use crate::principal::models::Principal;
use crate::principal::models::Username;
use crate::principal::ports::PrincipalRepository;

/// Postgres-backed credential store.
///
/// Username is the primary key; the duplicate-registration race is settled
/// by the table's uniqueness constraint, never by silent overwrite.
pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn create(&self, principal: Principal) -> Result<Principal, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO principals (username, password_hash, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(principal.username.as_str())
        .bind(&principal.password_hash)
        .bind(&principal.role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return IdentityError::AlreadyExists(principal.username.to_string());
                }
            }
            IdentityError::Database(e.to_string())
        })?;

        Ok(principal)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT username, password_hash, role
            FROM principals
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Principal {
                username: Username::new(r.get("username"))?,
                password_hash: r.get("password_hash"),
                role: r.get("role"),
            })),
            None => Ok(None),
        }
    }
}
