// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, models::user::Role};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// JWT Claims structure. This is the whole session state.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    /// Display name, so pages can greet the user without a lookup.
    pub name: String,
    pub role: Role,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Malformed session subject".to_string()))
    }
}

/// Signs a session token for the user, valid for `expiration_seconds`.
pub fn sign_jwt(
    id: i64,
    name: &str,
    role: Role,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        name: name.to_owned(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Builds the HttpOnly cookie that opens a session.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Drops the session cookie, closing the session.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"))
}

/// Reads the session from the cookie jar, if there is a valid one.
pub fn current_claims(jar: &CookieJar, config: &Config) -> Option<Claims> {
    let token = jar.get(SESSION_COOKIE)?;
    verify_jwt(token.value(), &config.secret_key).ok()
}

/// Axum Middleware: Authentication.
///
/// Validates the session cookie and injects `Claims` into the request
/// extensions for handlers to use. Without a valid session the request is
/// redirected to the login page.
pub async fn auth_middleware(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| AppError::AuthError("Missing session cookie".to_string()))?;

    let claims = verify_jwt(&token, &config.secret_key)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn require_role(req: &Request, role: Role) -> Result<(), AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::AuthError("No session".to_string()))?;

    if claims.role != role {
        return Err(AppError::Forbidden(format!(
            "You must be a {} to access that page.",
            role.as_str()
        )));
    }
    Ok(())
}

/// Axum Middleware: Teacher Authorization.
///
/// Must be used AFTER `auth_middleware`. Students get 403 Forbidden.
pub async fn teacher_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(&req, Role::Teacher)?;
    Ok(next.run(req).await)
}

/// Axum Middleware: Student Authorization.
///
/// Must be used AFTER `auth_middleware`. Teachers get 403 Forbidden.
pub async fn student_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(&req, Role::Student)?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn sign_and_verify_round_trip() {
        let token = sign_jwt(7, "ada", Role::Student, SECRET, 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.name, "ada");
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_jwt(1, "t", Role::Teacher, SECRET, 60).unwrap();
        assert!(matches!(
            verify_jwt(&token, "other-secret"),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: "1".to_string(),
            name: "t".to_string(),
            role: Role::Teacher,
            exp: 1,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());
    }
}
