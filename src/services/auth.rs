use std::sync::Arc;

use validator::Validate;

use crate::auth::token::{decode_uid, encode_uid};
use crate::auth::{hash_password, verify_password, SignupRequest, TokenIssuer, TokenPair};
use crate::error::AppError;
use crate::mail::Mailer;
use crate::models::NewUser;
use crate::store::UserStore;

/// Signup, login, and the password-reset flow. Works purely against the
/// injected [`UserStore`], [`TokenIssuer`], and [`Mailer`] capabilities.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    issuer: TokenIssuer,
    mailer: Arc<dyn Mailer>,
    reset_link_base: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        issuer: TokenIssuer,
        mailer: Arc<dyn Mailer>,
        reset_link_base: String,
    ) -> Self {
        Self {
            users,
            issuer,
            mailer,
            reset_link_base,
        }
    }

    /// Creates a new account and returns an access/refresh token pair.
    ///
    /// All fields are trimmed before the blank check, and the trimmed values
    /// are what gets stored.
    pub async fn signup(&self, req: &SignupRequest) -> Result<TokenPair, AppError> {
        let username = req.username.trim();
        let email = req.email.trim();
        let password = req.password.trim();
        let confirm_password = req.confirm_password.trim();

        if username.is_empty()
            || email.is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(AppError::Validation("All fields are required".into()));
        }
        if password != confirm_password {
            return Err(AppError::Validation("Passwords do not match".into()));
        }

        let trimmed = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        trimmed.validate()?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("Username is already taken".into()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        self.issuer.issue_pair(&user)
    }

    /// Verifies credentials and returns the access token plus the username.
    ///
    /// The error is the same whether the username is unknown or the password
    /// is wrong, so callers cannot probe which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, String), AppError> {
        match self.users.find_by_username(username).await? {
            Some(user) => {
                if verify_password(password, &user.password_hash)? {
                    let tokens = self.issuer.issue_pair(&user)?;
                    Ok((tokens.access, user.username))
                } else {
                    Err(AppError::BadRequest("Invalid credentials".into()))
                }
            }
            None => Err(AppError::BadRequest("Invalid credentials".into())),
        }
    }

    /// Derives a reset token for the account behind `email` and hands the
    /// reset link to the mail collaborator.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("Required field".into()));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No user found".into()))?;

        let token = self.issuer.issue_reset_token(&user);
        let uid = encode_uid(user.id);
        let reset_link = format!("{}/{}/{}/", self.reset_link_base, uid, token);

        self.mailer
            .send(
                &user.email,
                "Password Reset Request",
                &format!("Click the link to reset your password: {}", reset_link),
            )
            .await
    }

    /// Verifies a reset token against the user's current state and stores the
    /// new password hash. Error messages are fixed strings; internal failure
    /// detail is never echoed back.
    pub async fn confirm_password_reset(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user_id =
            decode_uid(uid).ok_or_else(|| AppError::BadRequest("Invalid user".into()))?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid user".into()))?;

        if !self.issuer.check_reset_token(&user, token) {
            return Err(AppError::BadRequest("Invalid or expired token".into()));
        }

        let new_password = new_password.trim();
        if new_password.is_empty() {
            return Err(AppError::Validation("Password is required".into()));
        }

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await
    }
}
