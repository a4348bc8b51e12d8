//! Auth service tests against a mocked identity provider

mod utils;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use shikaraka_lib::modules::auth::{AuthClient, AuthSession, AuthUser, SignUpRequest};
use shikaraka_lib::{AppError, AppResult};
use std::sync::Arc;
use utils::TestAppBuilder;
use uuid::Uuid;

mock! {
    pub Identity {}

    #[async_trait]
    impl AuthClient for Identity {
        async fn sign_up(
            &self,
            email: &str,
            password: &str,
            username: &str,
        ) -> AppResult<(AuthUser, Option<AuthSession>)>;
        async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;
        async fn sign_out(&self, access_token: &str) -> AppResult<()>;
        async fn current_user(&self, access_token: &str) -> AppResult<Option<AuthUser>>;
    }
}

fn user(email: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        username: None,
        email_confirmed: false,
    }
}

fn session(user: AuthUser) -> AuthSession {
    AuthSession {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: None,
        user,
    }
}

fn request(email: &str, username: &str) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: "hunter22".to_string(),
        username: username.to_string(),
    }
}

#[tokio::test]
async fn test_sign_up_creates_profile() {
    let account = user("new@example.com");
    let account_id = account.id;

    let mut identity = MockIdentity::new();
    identity
        .expect_sign_up()
        .with(eq("new@example.com"), eq("hunter22"), eq("newbie"))
        .times(1)
        .returning(move |_, _, _| Ok((account.clone(), None)));

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();
    let (registered, session) = services
        .auth
        .sign_up(request(" New@Example.com ", "newbie"))
        .await
        .unwrap();

    assert_eq!(registered.id, account_id);
    assert!(session.is_none());

    let profile = services.profiles.get_profile(&account_id).await.unwrap();
    assert_eq!(profile.username, "newbie");
    assert_eq!(profile.email.as_deref(), Some("new@example.com"));
}

#[tokio::test]
async fn test_invalid_sign_up_never_reaches_provider() {
    let mut identity = MockIdentity::new();
    identity.expect_sign_up().times(0);

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();

    let bad_email = services.auth.sign_up(request("not-an-email", "newbie")).await;
    assert!(matches!(bad_email, Err(AppError::ValidationError(_))));

    let bad_name = services.auth.sign_up(request("ok@example.com", "x")).await;
    assert!(matches!(bad_name, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_fourth_registration_attempt_is_limited() {
    let mut identity = MockIdentity::new();
    identity
        .expect_sign_up()
        .times(3)
        .returning(|_, _, _| Err(AppError::Unauthorized("User already registered".to_string())));

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();

    for _ in 0..3 {
        let err = services
            .auth
            .sign_up(request("taken@example.com", "taken"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::Unauthorized("Пользователь с таким email уже зарегистрирован".to_string())
        );
    }

    let err = services
        .auth
        .sign_up(request("TAKEN@example.com", "taken"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RateLimitExceeded { .. }));
}

#[tokio::test]
async fn test_sign_in_errors_are_localized() {
    let mut identity = MockIdentity::new();
    identity
        .expect_sign_in()
        .returning(|_, _| Err(AppError::Unauthorized("Invalid login credentials".to_string())));

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();
    let err = services
        .auth
        .sign_in("a@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Неверный email или пароль");

    assert!(matches!(
        services.auth.sign_in("", "").await,
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn test_sign_in_returns_session() {
    let account = user("me@example.com");
    let mut identity = MockIdentity::new();
    identity
        .expect_sign_in()
        .with(eq("me@example.com"), eq("secret1"))
        .returning(move |_, _| Ok(session(account.clone())));

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();
    let signed_in = services.auth.sign_in("ME@example.com", "secret1").await.unwrap();
    assert_eq!(signed_in.access_token, "access");
}

#[tokio::test]
async fn test_current_user_with_blank_token_skips_provider() {
    let mut identity = MockIdentity::new();
    identity.expect_current_user().times(0);
    identity.expect_sign_out().times(1).returning(|_| Ok(()));

    let services = TestAppBuilder::new().auth(Arc::new(identity)).build();
    assert!(services.auth.current_user("  ").await.unwrap().is_none());
    services.auth.sign_out("token").await.unwrap();
}
