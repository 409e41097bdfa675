use actix_web::{web, HttpResponse};
use validator::Validate;

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::verification::NotificationServiceTrait;
use ac_shared::utils::email::mask_email;

use crate::dto::auth::{VerifyCodeRequest, VerifyRegistrationResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/verify
///
/// Confirms a registration: the code must be the latest unused one issued
/// to the account and still inside the registration window. On success the
/// account is active and its email verified.
pub async fn verify_registration<U, C, N, T>(
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

    log::info!("Confirming registration for {}", mask_email(&request.email));

    let user = state
        .auth_service
        .confirm_registration(&request.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(VerifyRegistrationResponse {
        user_id: user.id,
        username: user.username,
        is_active: user.is_active,
        message: "Email verified. You can now log in.".to_string(),
    }))
}
