use std::env;

use actix_cors::Cors;
use actix_web::{web, HttpServer};
use anyhow::Context as _;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_site::{
    auth::password::hash_password,
    constants::{LIMITER_EVICTION_INTERVAL, START_TIME},
    create_app,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    limiter::rate_limiter::run_eviction,
    settings::{AppConfig, LogFormat},
    AppState,
};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Plain => registry.with(fmt::layer()).init(),
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// `portfolio_site hash-password <password>` prints an argon2 hash for
/// `APP_ADMIN_PASSWORD_HASH`.
fn run_hash_password(args: &[String]) -> anyhow::Result<()> {
    let password = args
        .get(2)
        .context("usage: portfolio_site hash-password <password>")?;
    let hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("{hash}");
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.get(1).map(String::as_str) == Some("hash-password") {
        return run_hash_password(&args);
    }

    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);
    once_cell::sync::Lazy::force(&START_TIME);

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to create database connection pool")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let app_state = web::Data::new(AppState::new(&config, pool)?);

    tokio::spawn(run_eviction(app_state.contact_limiter.clone(), LIMITER_EVICTION_INTERVAL));

    let server_addr = format!("{}:{}", config.host, config.port);
    let cors_origins = config.cors_origins();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        create_app(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run();

    tokio::select! {
        res = server => res.context("server error")?,
        _ = shutdown_signal() => {},
    }

    Ok(())
}
