use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sso_service::domain::identity::errors::AuthError;
use sso_service::domain::identity::errors::StoreError;
use sso_service::domain::identity::models::App;
use sso_service::domain::identity::models::AppId;
use sso_service::domain::identity::models::UserId;
use sso_service::domain::identity::ports::AppProvider;
use sso_service::domain::identity::ports::AuthServicePort;
use sso_service::domain::identity::service::Authenticator;
use sso_service::domain::identity::token::verify_token;
use sso_service::outbound::repositories::InMemoryStorage;

type MemoryAuthenticator = Authenticator<InMemoryStorage, InMemoryStorage, InMemoryStorage>;

fn app(id: i32) -> App {
    App {
        id: AppId(id),
        name: format!("app-{}", id),
        secret: format!("signing-secret-of-app-{}", id),
    }
}

fn setup() -> (Arc<InMemoryStorage>, MemoryAuthenticator) {
    let storage = Arc::new(InMemoryStorage::with_apps(vec![app(7), app(8)]));
    let authenticator = Authenticator::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::clone(&storage),
        chrono::Duration::minutes(15),
    );
    (storage, authenticator)
}

#[tokio::test]
async fn test_register_then_login_scenario() {
    let (_, authenticator) = setup();

    let user_id = authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .expect("Registration failed");
    assert_eq!(user_id, UserId(1));

    let token = authenticator
        .login("alice@example.com", "s3cr3t", AppId(7))
        .await
        .expect("Login failed");
    assert!(!token.is_empty());

    let claims = verify_token(&token, &app(7)).expect("Token validation failed");
    assert_eq!(claims.sub, "1");
    assert_eq!(claims.aud, "7");
    assert_eq!(claims.exp - claims.iat, 15 * 60);

    let result = authenticator
        .login("alice@example.com", "wrong", AppId(7))
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_wrong_password_fails_whether_or_not_email_exists() {
    let (_, authenticator) = setup();
    authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();

    for email in ["alice@example.com", "mallory@example.com"] {
        let result = authenticator.login(email, "guess", AppId(7)).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first_user() {
    let (_, authenticator) = setup();

    let first = authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();
    let second = authenticator
        .register_new_user("alice@example.com", "other")
        .await;
    assert!(matches!(second, Err(AuthError::UserAlreadyExists)));

    let token = authenticator
        .login("alice@example.com", "s3cr3t", AppId(7))
        .await
        .expect("Original credentials must still work");
    let claims = verify_token(&token, &app(7)).unwrap();
    assert_eq!(claims.sub, first.to_string());
}

#[tokio::test]
async fn test_empty_password_round_trips() {
    let (_, authenticator) = setup();

    authenticator
        .register_new_user("blank@example.com", "")
        .await
        .unwrap();

    assert!(authenticator
        .login("blank@example.com", "", AppId(7))
        .await
        .is_ok());
    assert!(matches!(
        authenticator
            .login("blank@example.com", "x", AppId(7))
            .await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_unknown_application_is_invalid_credentials() {
    let (_, authenticator) = setup();
    authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();

    let result = authenticator
        .login("alice@example.com", "s3cr3t", AppId(404))
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_tokens_are_scoped_to_their_application() {
    let (_, authenticator) = setup();
    authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();

    let token_a = authenticator
        .login("alice@example.com", "s3cr3t", AppId(7))
        .await
        .unwrap();
    let token_b = authenticator
        .login("alice@example.com", "s3cr3t", AppId(8))
        .await
        .unwrap();

    assert_ne!(token_a, token_b);
    assert!(verify_token(&token_a, &app(7)).is_ok());
    assert!(verify_token(&token_b, &app(8)).is_ok());
    assert!(verify_token(&token_a, &app(8)).is_err());
    assert!(verify_token(&token_b, &app(7)).is_err());
}

#[tokio::test]
async fn test_is_admin() {
    let (storage, authenticator) = setup();
    let regular = authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();
    let admin = authenticator
        .register_new_user("root@example.com", "t0ps3cr3t")
        .await
        .unwrap();
    storage.set_admin(admin, true).await.unwrap();

    assert!(!authenticator.is_admin(regular).await.unwrap());
    assert!(authenticator.is_admin(admin).await.unwrap());
    assert!(matches!(
        authenticator.is_admin(UserId(999)).await,
        Err(AuthError::NotFound)
    ));
}

#[tokio::test]
async fn test_concurrent_registrations_for_one_email() {
    let (_, authenticator) = setup();
    let authenticator = Arc::new(authenticator);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let authenticator = Arc::clone(&authenticator);
            tokio::spawn(async move {
                authenticator
                    .register_new_user("race@example.com", &format!("password-{}", i))
                    .await
            })
        })
        .collect();

    let mut registered = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.expect("Task panicked") {
            Ok(_) => registered += 1,
            Err(AuthError::UserAlreadyExists) => rejected += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(registered, 1);
    assert_eq!(rejected, 3);
}

/// Application registry that never answers and records when its call is dropped.
struct HangingAppProvider {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AppProvider for HangingAppProvider {
    async fn app(&self, _app_id: AppId) -> Result<App, StoreError> {
        let _flag = DropFlag(Arc::clone(&self.dropped));
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(StoreError::AppNotFound)
    }
}

#[tokio::test]
async fn test_dropping_login_cancels_pending_store_call() {
    let storage = Arc::new(InMemoryStorage::new());
    let dropped = Arc::new(AtomicBool::new(false));
    let authenticator = Authenticator::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::new(HangingAppProvider {
            dropped: Arc::clone(&dropped),
        }),
        chrono::Duration::minutes(15),
    );
    authenticator
        .register_new_user("alice@example.com", "s3cr3t")
        .await
        .unwrap();

    let result = tokio::time::timeout(
        Duration::from_millis(200),
        authenticator.login("alice@example.com", "s3cr3t", AppId(7)),
    )
    .await;

    assert!(result.is_err(), "login should still be waiting on the registry");
    assert!(dropped.load(Ordering::SeqCst));

    // Nothing is left behind: the next call behaves normally.
    assert!(authenticator.is_admin(UserId(1)).await.is_ok());
}
