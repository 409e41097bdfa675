use actix_web::{web, HttpResponse};
use validator::Validate;

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::verification::NotificationServiceTrait;
use ac_shared::utils::email::mask_email;

use crate::dto::auth::{LoginCodeRequest, LoginCodeResponse, VerifyCodeRequest};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/login/request-code
///
/// Emails a fresh login code to an active account.
pub async fn request_code<U, C, N, T>(
    state: web::Data<AppState<U, C, N, T>>,
    request: web::Json<LoginCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: NotificationServiceTrait + 'static,
    T: TokenRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    log::info!("Login code requested for {}", mask_email(&request.email));

    let issued = state.auth_service.request_login_code(&request.email).await?;

    let message = if issued.delivered {
        "Verification code sent. Check your email."
    } else {
        "The verification code could not be sent. Please try again."
    };

    Ok(HttpResponse::Ok().json(LoginCodeResponse {
        code_sent: issued.delivered,
        message: message.to_string(),
    }))
}

/// Handler for POST /api/v1/auth/login/verify
///
/// Exchanges a login code for an access token and a refresh token.
///
/// # Response
///
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "q8X...",
///     "expires_in": 900,
///     "user_id": "550e8400-e29b-41d4-a716-446655440000",
///     "username": "user_a1b2c3d4e5"
/// }
/// ```
pub async fn verify_code<U, C, N, T>(
    state: web::Data<AppState<U, C, N, T>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: NotificationServiceTrait + 'static,
    T: TokenRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .auth_service
        .verify_login_code(&request.email, &request.code)
        .await?;

    log::info!("User {} logged in", response.user_id);
    Ok(HttpResponse::Ok().json(response))
}
