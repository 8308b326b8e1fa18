use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Duration;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::AppId;
use crate::domain::identity::models::UserId;
use crate::domain::identity::ports::AppProvider;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::UserProvider;
use crate::domain::identity::ports::UserSaver;
use crate::domain::identity::token::mint_token;

/// Domain service implementation for authentication operations.
///
/// Stateless apart from its injected ports and the token lifetime, so a single
/// instance can be shared across any number of concurrent requests.
pub struct Authenticator<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
}

impl<US, UP, AP> Authenticator<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new authenticator with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - Persists newly registered users
    /// * `user_provider` - Reads users and their admin flag
    /// * `app_provider` - Resolves applications and their signing secrets
    /// * `token_ttl` - Lifetime of every token this instance issues
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            password_hasher: PasswordHasher::new(),
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

/// Classify a store failure that has no operation-specific meaning.
fn store_failure(op: &'static str, err: StoreError, context: &'static str) -> AuthError {
    match err {
        StoreError::Canceled => {
            tracing::warn!(op, "Store call canceled");
            AuthError::Canceled
        }
        other => {
            tracing::error!(op, error = %other, "{}", context);
            AuthError::internal(other, context)
        }
    }
}

#[async_trait]
impl<US, UP, AP> AuthServicePort for Authenticator<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        const OP: &str = "auth.login";
        tracing::info!(op = OP, app_id = %app_id, "Attempting to login user");

        // Unknown email and wrong password must be indistinguishable to the caller.
        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(StoreError::UserNotFound) => {
                tracing::warn!(op = OP, app_id = %app_id, "User not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(store_failure(OP, e, "failed to get user")),
        };

        let password_hasher = self.password_hasher;
        let candidate = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let password_matches =
            tokio::task::spawn_blocking(move || password_hasher.verify(&candidate, &stored_hash))
                .await
                .map_err(|e| {
                    tracing::error!(op = OP, user_id = %user.id, error = %e, "Password verification task failed");
                    AuthError::internal(e, "password verification task failed")
                })?
                .map_err(|e| {
                    tracing::error!(op = OP, user_id = %user.id, error = %e, "Failed to verify password");
                    AuthError::internal(e, "failed to verify password")
                })?;

        if !password_matches {
            tracing::info!(op = OP, user_id = %user.id, "Invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.app_provider.app(app_id).await {
            Ok(app) => app,
            Err(StoreError::Canceled) => {
                tracing::warn!(op = OP, app_id = %app_id, "Store call canceled");
                return Err(AuthError::Canceled);
            }
            Err(e) => {
                tracing::warn!(
                    op = OP,
                    user_id = %user.id,
                    app_id = %app_id,
                    error = %e,
                    "Application could not be resolved"
                );
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = mint_token(&user, &app, self.token_ttl).map_err(|e| {
            tracing::error!(op = OP, user_id = %user.id, app_id = %app.id, error = %e, "Failed to generate token");
            AuthError::internal(e, "failed to generate token")
        })?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app.id, "User logged in successfully");

        Ok(token)
    }

    async fn register_new_user(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        const OP: &str = "auth.register_new_user";
        tracing::info!(op = OP, "Registering new user");

        // Argon2 runs on the blocking pool.
        let password_hasher = self.password_hasher;
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || password_hasher.hash(&password))
            .await
            .map_err(|e| {
                tracing::error!(op = OP, error = %e, "Password hashing task failed");
                AuthError::internal(e, "password hashing task failed")
            })?
            .map_err(|e| {
                tracing::error!(op = OP, error = %e, "Failed to generate password hash");
                AuthError::internal(e, "failed to generate password hash")
            })?;

        let user_id = match self.user_saver.save_user(email, &password_hash).await {
            Ok(user_id) => user_id,
            Err(StoreError::UserExists) => {
                tracing::warn!(op = OP, "User already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => return Err(store_failure(OP, e, "failed to save user")),
        };

        tracing::info!(op = OP, user_id = %user_id, "New user registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        const OP: &str = "auth.is_admin";
        tracing::info!(op = OP, user_id = %user_id, "Checking if user is admin");

        match self.user_provider.is_admin(user_id).await {
            Ok(is_admin) => {
                tracing::info!(op = OP, user_id = %user_id, is_admin, "Checked if user is admin");
                Ok(is_admin)
            }
            Err(StoreError::UserNotFound) => {
                tracing::warn!(op = OP, user_id = %user_id, "User not found");
                Err(AuthError::NotFound)
            }
            Err(e) => Err(store_failure(OP, e, "failed to check admin flag")),
        }
    }
}
