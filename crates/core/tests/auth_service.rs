mod support;

use std::sync::Arc;

use support::repositories::MockUserRepository;
use support::tokens::FakeTokenService;
use vibekeeper_core::AuthService;
use vibekeeper_domain::{NewUser, VibeKeeperError};

fn service(users: &MockUserRepository) -> AuthService {
    AuthService::new(Arc::new(users.clone()), Arc::new(FakeTokenService))
}

#[tokio::test]
async fn dev_login_creates_user_once() {
    let users = MockUserRepository::default();
    let auth = service(&users);

    let (token, first) =
        auth.dev_login(NewUser::new(" dev@example.com ", "Dev User")).await.unwrap();
    assert_eq!(token.token_type, "bearer");
    assert_eq!(first.email, "dev@example.com");
    assert_eq!(first.provider, "dev");

    let (_, second) = auth.dev_login(NewUser::new("dev@example.com", "Renamed")).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.full_name, "Dev User");
    assert_eq!(users.count(), 1);
}

#[tokio::test]
async fn dev_login_validates_payload() {
    let users = MockUserRepository::default();
    let err = service(&users).dev_login(NewUser::new("nope", "Dev")).await.unwrap_err();
    assert!(matches!(err, VibeKeeperError::InvalidInput(_)));
    assert_eq!(users.count(), 0);
}

#[tokio::test]
async fn authenticate_round_trips_issued_token() {
    let users = MockUserRepository::default();
    let auth = service(&users);

    let (token, user) = auth.dev_login(NewUser::new("a@b.co", "A")).await.unwrap();
    let resolved = auth.authenticate(&token.access_token).await.unwrap();
    assert_eq!(resolved, user);
}

#[tokio::test]
async fn authenticate_rejects_bad_tokens_and_unknown_users() {
    let users = MockUserRepository::default();
    let auth = service(&users);

    let err = auth.authenticate("garbage").await.unwrap_err();
    assert_eq!(err, VibeKeeperError::Auth("Invalid token".into()));

    let err = auth.authenticate("token-abc").await.unwrap_err();
    assert_eq!(err, VibeKeeperError::Auth("Invalid token".into()));

    let err = auth.authenticate("token-99").await.unwrap_err();
    assert_eq!(err, VibeKeeperError::Auth("User not found".into()));
}

#[tokio::test]
async fn ensure_user_is_idempotent() {
    let users = MockUserRepository::default();
    let auth = service(&users);

    let guest = auth.ensure_user("guest@vibekeeper.local", "Guest", "web").await.unwrap();
    let again = auth.ensure_user("guest@vibekeeper.local", "Guest", "web").await.unwrap();
    assert_eq!(guest.id, again.id);
    assert_eq!(guest.provider, "web");
}
