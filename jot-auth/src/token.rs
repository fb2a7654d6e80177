// Session tokens.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use jot_core::model::{Principal, Role, User};

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// Returns `None` for a missing scheme, an empty token, or any other shape.
pub fn extract_bearer_token(value: &str) -> Option<&str> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Signing configuration for session tokens.
#[derive(Clone, Debug)]
pub struct TokenOptions {
    /// HMAC shared secret, sourced from process configuration.
    pub secret: String,
    /// Token validity window.
    pub expires_in: Duration,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            secret: "dev-secret".to_string(),
            expires_in: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Claims carried by a session token. Field names are part of the wire
/// contract; clients decode the payload to identify themselves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(rename = "tenantId")]
    pub tenant_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256-signed session tokens.
pub struct TokenService {
    options: TokenOptions,
}

impl TokenService {
    pub fn new(options: TokenOptions) -> Self {
        Self { options }
    }

    /// Sign a token identifying `user`, valid for the configured window.
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            tenant_id: user.tenant_id,
            iat: now,
            exp: now + self.options.expires_in.as_secs() as i64,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.options.secret.as_bytes()),
        )
        .map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    /// Verify a token and recover the principal it names.
    ///
    /// Fails closed: a bad signature, an expired token, or a malformed
    /// payload all yield `None`. Verification failures are logged at debug
    /// level and never propagate to the caller.
    pub fn decode(&self, token: &str) -> Option<Principal> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.options.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => Some(Principal {
                user_id: data.claims.user_id,
                email: data.claims.email,
                role: data.claims.role,
                tenant_id: data.claims.tenant_id,
            }),
            Err(e) => {
                tracing::debug!("token verification failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn service(secret: &str) -> TokenService {
        TokenService::new(TokenOptions {
            secret: secret.to_string(),
            expires_in: Duration::from_secs(3600),
        })
    }

    fn user() -> User {
        User {
            id: 3,
            email: "admin@acme.test".into(),
            password_hash: "irrelevant".into(),
            role: Role::Admin,
            tenant_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_decode_recovers_the_principal() {
        let svc = service("test-secret");
        let token = svc.issue(&user()).unwrap();

        let principal = svc.decode(&token).expect("token should verify");
        assert_eq!(principal.user_id, 3);
        assert_eq!(principal.email, "admin@acme.test");
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.tenant_id, 1);
    }

    #[test]
    fn wrong_secret_fails_closed() {
        let token = service("secret-a").issue(&user()).unwrap();
        assert!(service("secret-b").decode(&token).is_none());
    }

    #[test]
    fn garbage_fails_closed() {
        let svc = service("test-secret");
        assert!(svc.decode("").is_none());
        assert!(svc.decode("not.a.token").is_none());
    }

    #[test]
    fn expired_token_fails_closed() {
        let svc = service("test-secret");

        // Sign an exp well past the default validation leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 3,
            email: "admin@acme.test".into(),
            role: Role::Admin,
            tenant_id: 1,
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(svc.decode(&token).is_none());
    }

    #[test]
    fn claims_use_the_wire_field_names() {
        let svc = service("test-secret");
        let token = svc.issue(&user()).unwrap();

        // Decode the payload segment without verifying, the way a client does.
        use base64::Engine as _;
        let payload = token.split('.').nth(1).unwrap();
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["userId"], 3);
        assert_eq!(json["tenantId"], 1);
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn bearer_extraction_accepts_only_the_bearer_scheme() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("  Bearer   abc  "), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
