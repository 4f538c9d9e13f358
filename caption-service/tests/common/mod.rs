use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use caption_service::domain::caption::errors::CaptionError;
use caption_service::domain::caption::ports::Captioner;
use caption_service::domain::user::errors::AuthError;
use caption_service::domain::user::models::EmailAddress;
use caption_service::domain::user::models::NewUser;
use caption_service::domain::user::models::User;
use caption_service::domain::user::models::UserId;
use caption_service::domain::user::ports::UserRepository;
use caption_service::domain::user::service::AuthService;
use caption_service::inbound::http::router::create_router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_CAPTION: &str = "a dog running on a beach";

/// Test application driving the real router in-process against an
/// in-memory user directory and a stub captioner.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(AuthService::new(
            repository,
            Arc::new(PasswordHasher::new()),
            Arc::new(TokenCodec::new(TEST_SECRET)),
        ));
        let captioner = Arc::new(StubCaptioner);

        Self {
            router: create_router(auth_service, captioner),
        }
    }

    /// POST a JSON body and return (status, parsed response body).
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// GET with an optional raw Authorization header value.
    pub async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// POST a single-file multipart body to /upload.
    pub async fn upload(
        &self,
        authorization: Option<&str>,
        file_bytes: &[u8],
    ) -> (StatusCode, serde_json::Value) {
        let boundary = "test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"image.png\"\r\nContent-Type: image/png\r\n\r\n",
                boundary
            )
            .as_bytes(),
        );
        body.extend_from_slice(file_bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let mut builder = Request::builder().method("POST").uri("/upload").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        );
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Register an account and return its bearer token.
    pub async fn register_and_get_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/auth/register",
                serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, body)
    }
}

/// User directory backed by a Vec, ids assigned in insertion order
/// starting from 1, mirroring the BIGSERIAL column.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailAlreadyExists(new_user.email.to_string()));
        }

        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

/// Captioner that never leaves the process.
pub struct StubCaptioner;

#[async_trait]
impl Captioner for StubCaptioner {
    async fn caption(&self, _image: Vec<u8>) -> Result<String, CaptionError> {
        Ok(TEST_CAPTION.to_string())
    }
}
