use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenCodec;
use caption_service::config::Config;
use caption_service::domain::user::service::AuthService;
use caption_service::inbound::http::router::create_router;
use caption_service::outbound::captioner::HuggingFaceCaptioner;
use caption_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caption_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "caption-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    config.validate()?;

    tracing::info!(
        http_port = config.server.http_port,
        captioner_model = %config.captioner.model,
        jwt_expiration_days = config.jwt.expiration_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = TokenCodec::new(config.jwt.secret.as_bytes())
        .with_default_ttl(Duration::days(config.jwt.expiration_days));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PostgresUserRepository::new(pg_pool)),
        Arc::new(PasswordHasher::new()),
        Arc::new(token_codec),
    ));
    let captioner = Arc::new(HuggingFaceCaptioner::new(&config.captioner)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, captioner);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
