use loomap_api::error::ApiError;
use loomap_api::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use loomap_api::usecase::user::GetUserUseCase;
use loomap_auth_types::token::validate_access_token;

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET};

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
        name: Some("Sam Rivera".to_owned()),
    }
}

async fn registered(users: &MockUserRepo) -> uuid::Uuid {
    let usecase = RegisterUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    usecase
        .execute(register_input("sam@nyu.edu", "hunter2!"))
        .await
        .unwrap()
        .user_id
}

// ── RegisterUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_and_issue_valid_token() {
    let users = MockUserRepo::default();
    let usecase = RegisterUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let session = usecase
        .execute(register_input(" sam@nyu.edu ", "hunter2!"))
        .await
        .unwrap();

    let info = validate_access_token(&session.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, session.user_id);

    let stored = users.users.lock().unwrap()[0].clone();
    assert_eq!(stored.email, "sam@nyu.edu");
    assert_ne!(stored.password_hash, "hunter2!");
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let users = MockUserRepo::default();
    registered(&users).await;
    let usecase = RegisterUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(register_input("sam@nyu.edu", "another"))
        .await;

    assert!(matches!(result, Err(ApiError::UserAlreadyExists)));
    assert_eq!(users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_blank_registration_fields() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(RegisterInput {
            name: Some("   ".into()),
            ..register_input("sam@nyu.edu", "hunter2!")
        })
        .await;
    assert!(matches!(result, Err(ApiError::MissingData)));

    let result = usecase
        .execute(RegisterInput {
            password: None,
            ..register_input("sam@nyu.edu", "hunter2!")
        })
        .await;
    assert!(matches!(result, Err(ApiError::MissingData)));
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_correct_password() {
    let users = MockUserRepo::default();
    let user_id = registered(&users).await;
    let usecase = LoginUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let session = usecase
        .execute(LoginInput {
            email: Some("sam@nyu.edu".into()),
            password: Some("hunter2!".into()),
        })
        .await
        .unwrap();

    assert_eq!(session.user_id, user_id);
    assert!(session.access_token_exp > 0);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let users = MockUserRepo::default();
    registered(&users).await;
    let usecase = LoginUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let wrong_password = usecase
        .execute(LoginInput {
            email: Some("sam@nyu.edu".into()),
            password: Some("nope".into()),
        })
        .await;
    let unknown_email = usecase
        .execute(LoginInput {
            email: Some("alex@nyu.edu".into()),
            password: Some("hunter2!".into()),
        })
        .await;

    assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(ApiError::InvalidCredentials)));
}

#[tokio::test]
async fn should_require_login_fields() {
    let usecase = LoginUseCase {
        users: MockUserRepo::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(LoginInput {
            email: Some("sam@nyu.edu".into()),
            password: None,
        })
        .await;

    assert!(matches!(result, Err(ApiError::MissingData)));
}

// ── GetUserUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_load_registered_user() {
    let users = MockUserRepo::default();
    let user_id = registered(&users).await;
    let usecase = GetUserUseCase { repo: users };

    let user = usecase.execute(user_id).await.unwrap();

    assert_eq!(user.name, "Sam Rivera");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let usecase = GetUserUseCase {
        repo: MockUserRepo::default(),
    };

    let result = usecase.execute(uuid::Uuid::now_v7()).await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}
