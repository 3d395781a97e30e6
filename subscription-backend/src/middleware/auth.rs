// subscription-backend/src/middleware/auth.rs

use crate::domain::user_claims::UserClaims;
use crate::error::AppError;
use crate::utils::jwt::JwtManager;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_COOKIE_NAME: &str = "access_token";

/// JWT認証ミドルウェアの設定
#[derive(Clone)]
pub struct AuthMiddlewareConfig {
    pub jwt_manager: Arc<JwtManager>,
    pub access_token_cookie_name: String,
}

impl AuthMiddlewareConfig {
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            jwt_manager,
            access_token_cookie_name: ACCESS_TOKEN_COOKIE_NAME.to_string(),
        }
    }
}

/// 認証済みユーザー情報を格納するエクステンション
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: UserClaims,
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn new(claims: UserClaims, access_token: String) -> Self {
        Self {
            claims,
            access_token,
        }
    }

    pub fn user_id(&self) -> uuid::Uuid {
        self.claims.user_id
    }
}

pub async fn jwt_auth_middleware(
    State(config): State<AuthMiddlewareConfig>,
    headers: HeaderMap,
    cookie_jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    // トークンを抽出
    let token = extract_token(&headers, &cookie_jar, &config.access_token_cookie_name).ok_or_else(
        || {
            warn!(path = %path, "Missing authentication token");
            AppError::Unauthorized("Authentication required".to_string())
        },
    )?;

    // JWTを検証
    let access_claims = config
        .jwt_manager
        .verify_access_token(&token)
        .map_err(|e| {
            warn!(path = %path, error = %e, "Invalid access token");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

    debug!(user_id = %access_claims.user.user_id, path = %path, "Request authenticated");

    request
        .extensions_mut()
        .insert(AuthenticatedUser::new(access_claims.user, token));

    Ok(next.run(request).await)
}

// --- ヘルパー関数 ---

/// リクエストからトークンを抽出
fn extract_token(headers: &HeaderMap, cookie_jar: &CookieJar, cookie_name: &str) -> Option<String> {
    // Authorization ヘッダーからトークンを取得
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    // Cookieからトークンを取得（フォールバック）
    let cookie_token = cookie_jar
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty());

    auth_header.or(cookie_token)
}

// --- Axum Extractors ---

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
