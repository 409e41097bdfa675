//! Application factory
//!
//! Builds the Actix-web application around an `AppState`, registering the
//! token verifier used by `JwtAuth` and the JSON body error handler.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};
use std::sync::Arc;

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::verification::NotificationServiceTrait;
use ac_shared::errors::{error_codes, ErrorResponse};
use ac_shared::types::HealthResponse;

use crate::middleware::auth::{JwtAuth, TokenVerifier};
use crate::routes::auth::{
    login::{request_code, verify_code},
    logout::logout,
    register::register,
    verify::verify_registration,
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, C, N, T>(
    app_state: web::Data<AppState<U, C, N, T>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: NotificationServiceTrait + 'static,
    T: TokenRepository + 'static,
{
    let verifier: Arc<dyn TokenVerifier> = app_state.auth_service.token_service().clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, C, N, T>))
                    .route("/verify", web::post().to(verify_registration::<U, C, N, T>))
                    .route(
                        "/login/request-code",
                        web::post().to(request_code::<U, C, N, T>),
                    )
                    .route("/login/verify", web::post().to(verify_code::<U, C, N, T>))
                    .service(
                        web::resource("/logout")
                            .wrap(JwtAuth::new())
                            .route(web::post().to(logout::<U, C, N, T>)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Malformed or mistyped JSON bodies become 400 `VALIDATION_ERROR`
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {}", err);
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body.")
        .add_detail("reason", err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
