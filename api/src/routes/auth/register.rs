use actix_web::{web, HttpResponse};
use validator::Validate;

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::verification::NotificationServiceTrait;
use ac_shared::utils::email::mask_email;
use ac_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an inactive account and emails it a confirmation code.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "phone_number": "+61412345678" }
/// ```
///
/// Either field may be omitted, but not both.
///
/// # Response
///
/// 201 Created with the generated username and whether the code was sent.
pub async fn register<U, C, N, T>(
    state: web::Data<AppState<U, C, N, T>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: NotificationServiceTrait + 'static,
    T: TokenRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    log::info!(
        "Processing registration for email: {}, phone: {}",
        request.email.as_deref().map(mask_email).unwrap_or_default(),
        request
            .phone_number
            .as_deref()
            .map(mask_phone_number)
            .unwrap_or_default()
    );

    let result = state
        .auth_service
        .register(request.email.as_deref(), request.phone_number.as_deref())
        .await?;

    let message = if result.issued.delivered {
        "Account created. Check your email for the verification code."
    } else if result.user.has_email() {
        "Account created, but the verification code could not be sent."
    } else {
        "Account created."
    };

    Ok(HttpResponse::Created().json(RegisterResponse {
        user_id: result.user.id,
        username: result.user.username,
        email: result.user.email,
        phone_number: result.user.phone_number,
        code_sent: result.issued.delivered,
        message: message.to_string(),
    }))
}
