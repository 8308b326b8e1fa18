use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::App;
use crate::domain::identity::models::AppId;
use crate::domain::identity::models::User;
use crate::domain::identity::models::UserId;
use crate::domain::identity::ports::AppProvider;
use crate::domain::identity::ports::UserProvider;
use crate::domain::identity::ports::UserSaver;

/// Process-local user store and application registry.
///
/// Assigns user identifiers sequentially starting at 1. Used when no database is
/// configured and in tests.
pub struct InMemoryStorage {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_user_id: i64,
    users: HashMap<UserId, StoredUser>,
    user_ids_by_email: HashMap<String, UserId>,
    apps: HashMap<AppId, App>,
}

struct StoredUser {
    user: User,
    is_admin: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::with_apps(Vec::new())
    }

    /// Create a store with a pre-provisioned application registry.
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> Self {
        let state = State {
            apps: apps.into_iter().map(|app| (app.id, app)).collect(),
            ..State::default()
        };

        Self {
            state: RwLock::new(state),
        }
    }

    /// Grant or revoke administrator privilege.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound)?;
        stored.is_admin = is_admin;
        Ok(())
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserSaver for InMemoryStorage {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StoreError> {
        let mut state = self.state.write().await;

        if state.user_ids_by_email.contains_key(email) {
            return Err(StoreError::UserExists);
        }

        state.last_user_id += 1;
        let user_id = UserId(state.last_user_id);
        let user = User {
            id: user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };

        state.user_ids_by_email.insert(user.email.clone(), user_id);
        state.users.insert(
            user_id,
            StoredUser {
                user,
                is_admin: false,
            },
        );

        Ok(user_id)
    }
}

#[async_trait]
impl UserProvider for InMemoryStorage {
    async fn user(&self, email: &str) -> Result<User, StoreError> {
        let state = self.state.read().await;

        state
            .user_ids_by_email
            .get(email)
            .and_then(|user_id| state.users.get(user_id))
            .map(|stored| stored.user.clone())
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        self.state
            .read()
            .await
            .users
            .get(&user_id)
            .map(|stored| stored.is_admin)
            .ok_or(StoreError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for InMemoryStorage {
    async fn app(&self, app_id: AppId) -> Result<App, StoreError> {
        self.state
            .read()
            .await
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StoreError::AppNotFound)
    }
}
