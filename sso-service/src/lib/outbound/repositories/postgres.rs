use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::App;
use crate::domain::identity::models::AppId;
use crate::domain::identity::models::User;
use crate::domain::identity::models::UserId;
use crate::domain::identity::ports::AppProvider;
use crate::domain::identity::ports::UserProvider;
use crate::domain::identity::ports::UserSaver;

const USERS_EMAIL_KEY: &str = "users_email_key";

pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.pass_hash,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i32,
    name: String,
    secret: String,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: row.secret,
        }
    }
}

/// A closed pool means the process is shutting down and the call was aborted.
/// An acquire timeout is the store's own deadline and stays a database failure.
fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolClosed => StoreError::Canceled,
        other => StoreError::Database(other.to_string()),
    }
}

#[async_trait]
impl UserSaver for PostgresStorage {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_KEY) {
                    return StoreError::UserExists;
                }
            }
            store_error(e)
        })?;

        Ok(UserId(id))
    }
}

#[async_trait]
impl UserProvider for PostgresStorage {
    async fn user(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(User::from)
        .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .ok_or(StoreError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for PostgresStorage {
    async fn app(&self, app_id: AppId) -> Result<App, StoreError> {
        sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(App::from)
        .ok_or(StoreError::AppNotFound)
    }
}
