use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::routes::AppState;

/// Account role carried in the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
    Admin,
}

/// Access token claims issued by the account service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Role {0:?} may not access this resource")]
    Forbidden(Role),

    #[error("Token validation is not configured")]
    Misconfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => "Unauthorized",
            AuthError::Forbidden(_) => "Forbidden",
            AuthError::Misconfigured => "Internal error",
        };

        HttpResponse::build(status).json(ErrorResponse::new(error, self.client_message(), status.as_u16()))
    }
}

impl AuthError {
    /// Message returned to the caller; token decoding details stay in the logs
    fn client_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Missing bearer token",
            AuthError::InvalidToken(_) => "Invalid or expired token",
            AuthError::Forbidden(_) => "Insufficient role for this resource",
            AuthError::Misconfigured => "Token validation is not configured",
        }
    }
}

/// Validates HS256 access tokens
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Caller identity extracted from the `Authorization: Bearer` header
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::Forbidden(self.role))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::Misconfigured)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = state.tokens.validate(token).map_err(|e| {
        tracing::info!("Rejected token on {}: {}", req.path(), e);
        e
    })?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, role: Role, exp: usize) -> String {
        let claims = Claims { sub: 5, role, exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn future_exp() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_valid_token() {
        let validator = TokenValidator::new("secret");
        let claims = validator.validate(&token("secret", Role::Employer, future_exp())).unwrap();
        assert_eq!(claims.sub, 5);
        assert_eq!(claims.role, Role::Employer);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let validator = TokenValidator::new("secret");
        assert!(validator.validate(&token("other", Role::Employer, future_exp())).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let validator = TokenValidator::new("secret");
        assert!(validator.validate(&token("secret", Role::JobSeeker, 1)).is_err());
    }

    #[test]
    fn test_invalid_token_body_hides_decode_detail() {
        let err = TokenValidator::new("secret")
            .validate(&token("other", Role::Employer, future_exp()))
            .unwrap_err();
        let detail = err.to_string();

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.client_message(), "Invalid or expired token");
        assert_ne!(err.client_message(), detail);
    }

    #[test]
    fn test_role_check() {
        let user = AuthenticatedUser { user_id: 1, role: Role::Admin };
        assert!(user.require(Role::Admin).is_ok());
        assert!(matches!(user.require(Role::Employer), Err(AuthError::Forbidden(Role::Admin))));
        assert_eq!(
            AuthError::Forbidden(Role::Admin).status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
