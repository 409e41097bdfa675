use actix_web::{web, HttpResponse};

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::verification::NotificationServiceTrait;

use crate::dto::auth::LogoutRequest;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token in the body (`refresh_token`, or `refresh`).
/// Requires a bearer access token.
///
/// # Response
///
/// 205 Reset Content on success; 400 `INVALID_OR_EXPIRED_TOKEN` when the
/// refresh token is unknown, expired or already revoked.
pub async fn logout<U, C, N, T>(
    state: web::Data<AppState<U, C, N, T>>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: NotificationServiceTrait + 'static,
    T: TokenRepository + 'static,
{
    state.auth_service.logout(&request.refresh_token).await?;

    log::info!("User {} logged out", auth.user_id);
    Ok(HttpResponse::ResetContent().finish())
}
