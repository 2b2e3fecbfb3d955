use std::sync::Arc;

use async_trait::async_trait;

use crate::principal::errors::IdentityError;
use crate::principal::models::Principal;
use crate::principal::models::RegisterCommand;
use crate::principal::models::Username;
use crate::principal::models::DEFAULT_ROLE;
use crate::principal::ports::IdentityServicePort;
use crate::principal::ports::PrincipalRepository;

/// Domain service for registration and identity resolution.
///
/// Bridges the credential store into the [`Principal`] shape consumed by
/// token verification and downstream authorization.
pub struct IdentityService<R>
where
    R: PrincipalRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> IdentityService<R>
where
    R: PrincipalRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<R> IdentityServicePort for IdentityService<R>
where
    R: PrincipalRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Principal, IdentityError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(IdentityError::AlreadyExists(command.username.to_string()));
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;

        let principal = Principal {
            username: command.username,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        };

        // The pre-check above can race a concurrent registration; the
        // store's uniqueness constraint settles it and create() reports
        // the loser as AlreadyExists.
        let created = self.repository.create(principal).await?;

        tracing::info!(username = %created.username, role = %created.role, "Principal registered");

        Ok(created)
    }

    async fn resolve(&self, username: &Username) -> Result<Principal, IdentityError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| IdentityError::NotFound(username.to_string()))
    }
}
