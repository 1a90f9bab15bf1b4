use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderMap, HeaderValue, Request, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use finboard_core::errors::{Error as CoreError, Result as CoreResult};
use finboard_core::users::{PasswordHasherTrait, User, UserRegistration};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::JsonBody;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Signs and checks access tokens and hashes user passwords.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

/// Username and password, accepted as a form or as JSON.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

/// Subject of a validated bearer token, placed in request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub String);

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
        }
    }

    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the token subject.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_)
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    fn token_response(&self, user: User) -> Result<TokenResponse, AuthError> {
        Ok(TokenResponse {
            access_token: self.issue_token(&user.username)?,
            token_type: "bearer".to_string(),
            expires_in: self.expires_in().as_secs(),
            user,
        })
    }
}

impl PasswordHasherTrait for AuthManager {
    fn hash_password(&self, password: &str) -> CoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Unexpected(format!("Failed to hash password: {e}")))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> CoreResult<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| CoreError::Unexpected(format!("Stored password hash is invalid: {e}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(CoreError::Unexpected(format!(
                "Password verification failed: {other}"
            ))),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect username or password".to_string(),
            ),
            AuthError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => {
                ApiError::Unauthorized("Could not validate credentials".into())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect username or password".into())
            }
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Accepts a base64 key or a raw 32-character string; either must yield 32 bytes.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers()).ok_or(AuthError::Unauthorized)?;
    let username = state.auth.validate_token(token)?;
    request
        .extensions_mut()
        .insert(AuthenticatedUser(username));
    Ok(next.run(request).await)
}

async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(registration): JsonBody<UserRegistration>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let user = state.user_service.register(registration).await?;
    let response = state.auth.token_response(user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

fn authenticate(state: &AppState, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
    let user = state
        .user_service
        .authenticate(&credentials.username, &credentials.password)?
        .ok_or(AuthError::InvalidCredentials)?;
    tracing::info!("User '{}' logged in", user.username);
    Ok(state.auth.token_response(user)?)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, Response> {
    login_response(&state, &credentials)
}

async fn login_json(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Response> {
    login_response(&state, &credentials)
}

// Bad credentials keep the bearer challenge header.
fn login_response(
    state: &AppState,
    credentials: &LoginRequest,
) -> Result<Json<TokenResponse>, Response> {
    authenticate(state, credentials).map(Json).map_err(|err| match err {
        ApiError::Unauthorized(_) => AuthError::InvalidCredentials.into_response(),
        other => other.into_response(),
    })
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(username)): Extension<AuthenticatedUser>,
) -> Result<Json<User>, Response> {
    match state.user_service.get_user_by_username(&username) {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(AuthError::Unauthorized.into_response()),
        Err(e) => Err(ApiError::from(e).into_response()),
    }
}

async fn verify(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    let username = match bearer_token(&headers).map(|t| state.auth.validate_token(t)) {
        Some(Ok(subject)) => state
            .user_service
            .get_user_by_username(&subject)?
            .map(|user| user.username),
        Some(Err(AuthError::Internal(msg))) => return Err(ApiError::Internal(msg)),
        _ => None,
    };
    Ok(Json(json!({
        "valid": username.is_some(),
        "username": username,
    })))
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/login/json", post(login_json))
        .route("/auth/verify", get(verify))
        .route(
            "/auth/me",
            get(me).route_layer(middleware::from_fn_with_state(state, require_jwt)),
        )
}
