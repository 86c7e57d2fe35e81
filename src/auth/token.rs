use crate::error::AppError;
use crate::models::User;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lifetime of an access token.
const ACCESS_TOKEN_HOURS: i64 = 24;
/// Lifetime of a refresh token.
const REFRESH_TOKEN_DAYS: i64 = 30;
/// Window within which a password-reset token verifies.
const RESET_TOKEN_SECS: i64 = 60 * 60;

/// Distinguishes the two credential kinds minted for a login session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API requests.
    Access,
    /// Longer-lived credential for obtaining new access tokens.
    Refresh,
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Username of the authenticated user.
    pub username: String,
    /// Whether this is an access or refresh token.
    pub token_type: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// An access/refresh credential pair returned on signup and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Mints and validates the credentials used by the API: JWT access and
/// refresh tokens, and the stateless password-reset tokens.
///
/// The signing secret is injected at construction rather than read from the
/// environment, so handlers and tests share one explicitly wired issuer.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues an access and refresh token pair for a user, embedding the
    /// username as a claim.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access: self.issue(user, TokenKind::Access)?,
            refresh: self.issue(user, TokenKind::Refresh)?,
        })
    }

    fn issue(&self, user: &User, kind: TokenKind) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let lifetime = match kind {
            TokenKind::Access => chrono::Duration::hours(ACCESS_TOKEN_HOURS),
            TokenKind::Refresh => chrono::Duration::days(REFRESH_TOKEN_DAYS),
        };
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            token_type: kind,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a presented access token and decodes its claims.
    ///
    /// Default validation checks are applied (signature, expiration), and a
    /// refresh token presented where an access token is expected is rejected.
    pub fn validate_access(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if claims.token_type != TokenKind::Access {
            return Err(AppError::Unauthorized(
                "Invalid token: wrong token type".into(),
            ));
        }
        Ok(claims)
    }

    /// Issues a single-use password-reset token for a user.
    ///
    /// The token is a timestamp plus a digest over the secret, the user id,
    /// and the current password hash. Because the password hash is part of
    /// the digest, every outstanding token stops verifying the moment the
    /// password changes.
    pub fn issue_reset_token(&self, user: &User) -> String {
        let ts = chrono::Utc::now().timestamp();
        format!("{:x}-{}", ts, self.reset_signature(user, ts))
    }

    /// Checks a password-reset token against the user's current state.
    pub fn check_reset_token(&self, user: &User, token: &str) -> bool {
        let Some((ts_hex, signature)) = token.split_once('-') else {
            return false;
        };
        let Ok(ts) = i64::from_str_radix(ts_hex, 16) else {
            return false;
        };
        let now = chrono::Utc::now().timestamp();
        if now - ts > RESET_TOKEN_SECS || ts > now + 60 {
            return false;
        }
        signature == self.reset_signature(user, ts)
    }

    fn reset_signature(&self, user: &User, ts: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(user.id.to_be_bytes());
        hasher.update(user.password_hash.as_bytes());
        hasher.update(ts.to_be_bytes());
        hex::encode(&hasher.finalize()[..16])
    }
}

/// Encodes a user id as the URL-safe uid segment of a reset link.
pub fn encode_uid(user_id: i32) -> String {
    URL_SAFE_NO_PAD.encode(user_id.to_string())
}

/// Decodes the uid segment of a reset link back into a user id.
pub fn decode_uid(uid: &str) -> Option<i32> {
    let bytes = URL_SAFE_NO_PAD.decode(uid).ok()?;
    String::from_utf8(bytes).ok()?.parse().ok()
}
