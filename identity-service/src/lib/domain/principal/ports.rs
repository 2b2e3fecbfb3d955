use async_trait::async_trait;

use crate::principal::errors::IdentityError;
use crate::principal::models::Principal;
use crate::principal::models::RegisterCommand;
use crate::principal::models::Username;

/// Port for identity domain operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new principal.
    ///
    /// Hashes the password and persists the principal with the default
    /// role. The duplicate pre-check races with concurrent registrations;
    /// the store's uniqueness constraint is the authority, so two
    /// simultaneous registrations of one username yield exactly one
    /// success and one `AlreadyExists`.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Principal, IdentityError>;

    /// Resolve a username to its principal.
    ///
    /// # Errors
    /// * `NotFound` - No principal with this username
    /// * `Database` - Store operation failed
    async fn resolve(&self, username: &Username) -> Result<Principal, IdentityError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Persist a new principal.
    ///
    /// The store enforces username uniqueness; a duplicate insert must
    /// fail rather than overwrite.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username uniqueness violated
    /// * `Database` - Store operation failed
    async fn create(&self, principal: Principal) -> Result<Principal, IdentityError>;

    /// Look up a principal by username.
    ///
    /// # Returns
    /// `None` when absent; absence is not an error at this layer
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Principal>, IdentityError>;
}
