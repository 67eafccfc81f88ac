use account_core::{
    application::{
        ports::{ClockPort, PasswordHasherPort, TokenEncryptorPort, UniqueTokenGeneratorPort},
        services::ApplicationServices,
    },
    config::AppConfig,
    domain::{account::AccountRepository, refresh_token::RefreshTokenRepository},
    infrastructure::{
        database,
        repositories::{
            PostgresAccountRepository, PostgresRefreshTokenRepository, RedisRefreshTokenRepository,
        },
        security::{
            password::Argon2PasswordHasher, token::BiscuitTokenEncryptor,
            token_generator::UuidTokenGenerator,
        },
        time::SystemClock,
    },
};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tokio::{signal, time::MissedTickBehavior};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let account_repo: Arc<dyn AccountRepository> =
        Arc::new(PostgresAccountRepository::new(pool.clone()));
    let refresh_token_repo: Arc<dyn RefreshTokenRepository> = match config.redis_url() {
        Some(url) => {
            tracing::info!("refresh tokens stored in redis");
            Arc::new(RedisRefreshTokenRepository::from_url(url)?)
        }
        None => Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
    };

    let argon2 = config.argon2();
    let password_hasher: Arc<PasswordHasherPort> = Arc::new(Argon2PasswordHasher::new(
        argon2.memory_kib,
        argon2.iterations,
        argon2.parallelism,
    )?);
    let token_encryptor: Arc<TokenEncryptorPort> = Arc::new(BiscuitTokenEncryptor::new(
        config.biscuit_private_key(),
        config.access_token_ttl(),
    )?);
    let token_generator: Arc<UniqueTokenGeneratorPort> = Arc::new(UuidTokenGenerator);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);

    let services = ApplicationServices::new(
        account_repo,
        refresh_token_repo,
        password_hasher,
        token_encryptor,
        token_generator,
        clock,
        chrono::Duration::from_std(config.refresh_token_ttl())?,
    );

    tracing::info!(
        interval_secs = config.purge_interval().as_secs(),
        "account services ready"
    );

    tokio::select! {
        _ = purge_loop(&services, config.purge_interval()) => {}
        _ = shutdown_signal() => {}
    }

    Ok(())
}

async fn purge_loop(services: &ApplicationServices, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match services.expired_token_purge.execute().await {
            Ok(purged) => tracing::debug!(purged, "purge pass finished"),
            Err(err) => tracing::warn!(error = %err, "refresh token purge failed"),
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
