use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use ac_api::app::create_app;
use ac_api::routes::auth::AppState;
use ac_core::services::auth::{AuthService, AuthServiceConfig};
use ac_core::services::token::{TokenService, TokenServiceConfig};
use ac_core::services::verification::{VerificationService, VerificationServiceConfig};
use ac_infra::database::{
    DatabasePool, MySqlTokenRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
};
use ac_infra::notification::{create_email_service, EmailServiceAdapter};
use ac_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!("Starting Authcode API server ({})", config.environment);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development default");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(pool.get_pool().clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));

    let email_service =
        create_email_service(&config.email).context("failed to configure email delivery")?;
    let notifier = Arc::new(EmailServiceAdapter::new(
        email_service,
        config.email.subject.clone(),
    ));
    info!("Email provider: {}", notifier.provider_name());

    let verification_service = Arc::new(VerificationService::new(
        code_repository,
        notifier,
        VerificationServiceConfig::from(&config.verification),
    ));
    let token_service = Arc::new(TokenService::new(
        token_repository,
        TokenServiceConfig::from(&config.auth.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service,
        token_service,
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState::new(auth_service));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
