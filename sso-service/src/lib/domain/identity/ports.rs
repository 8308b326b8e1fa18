use async_trait::async_trait;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::App;
use crate::domain::identity::models::AppId;
use crate::domain::identity::models::User;
use crate::domain::identity::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token for an application.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `password` - Plaintext password
    /// * `app_id` - Application the token is requested for
    ///
    /// # Returns
    /// Signed session token scoped to `app_id`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or unknown application
    /// * `Canceled` - A store aborted the call
    /// * `Internal` - Store, hashing or signing failure
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `email` - User email, unique across the store
    /// * `password` - Plaintext password (hashed before it reaches the store)
    ///
    /// # Returns
    /// Store-assigned user identifier
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Canceled` - The store aborted the call
    /// * `Internal` - Store or hashing failure
    async fn register_new_user(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Check whether a user has administrator privilege.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Canceled` - The store aborted the call
    /// * `Internal` - Store failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence of newly registered users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Persist a user and return its assigned identifier.
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Canceled` - Call aborted before completion
    /// * `Database` - Storage failure
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StoreError>;
}

/// Read access to registered users.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by email.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Canceled` - Call aborted before completion
    /// * `Database` - Storage failure
    async fn user(&self, email: &str) -> Result<User, StoreError>;

    /// Retrieve the admin flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Canceled` - Call aborted before completion
    /// * `Database` - Storage failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError>;
}

/// Application registry lookups.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Resolve an application, including its signing secret.
    ///
    /// # Errors
    /// * `AppNotFound` - Application is not registered
    /// * `Canceled` - Call aborted before completion
    /// * `Database` - Storage failure
    async fn app(&self, app_id: AppId) -> Result<App, StoreError>;
}
