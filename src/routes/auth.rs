use crate::{
    auth::{AuthenticatedUser, LoginRequest, LoginResponse, ResetConfirmRequest, ResetRequest,
        SignupRequest, SignupResponse},
    error::AppError,
    services::AuthService,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new account
///
/// Creates a user and returns an access/refresh token pair.
#[post("/signup")]
pub async fn signup(
    service: web::Data<AuthService>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let tokens = service.signup(&signup_data).await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "Registered Successfully".to_string(),
        tokens,
    }))
}

/// Login
///
/// Verifies credentials and returns an access token plus the username.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (access, username) = service
        .login(&login_data.username, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access,
        username,
        message: "Login successful".to_string(),
    }))
}

/// Dashboard probe
///
/// Confirms that the presented access token is valid.
#[get("/home")]
pub async fn home(_user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to dashboard"
    }))
}

/// Request a password-reset email
#[post("/password-reset")]
pub async fn request_password_reset(
    service: web::Data<AuthService>,
    reset_data: web::Json<ResetRequest>,
) -> Result<impl Responder, AppError> {
    service.request_password_reset(&reset_data.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Mail sent"
    })))
}

/// Confirm a password reset
///
/// The uid and token come from the link mailed by the request endpoint.
#[post("/password-reset-confirm/{uid}/{token}")]
pub async fn confirm_password_reset(
    service: web::Data<AuthService>,
    path: web::Path<(String, String)>,
    reset_data: web::Json<ResetConfirmRequest>,
) -> Result<impl Responder, AppError> {
    let (uid, token) = path.into_inner();
    service
        .confirm_password_reset(&uid, &token, &reset_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password reset success!"
    })))
}
