use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use credit_application::config::{AppConfig, Config, LogFormat};
use credit_application::credits::{CreditService, MySqlCreditRepository};
use credit_application::customers::{CustomerService, MySqlCustomerRepository};
use credit_application::modules;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(app: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("credit_application={},actix_web=info", app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting Credit Application Backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    if config.app.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let customer_service = Arc::new(CustomerService::new(Arc::new(
        MySqlCustomerRepository::new(db_pool.clone()),
    )));
    let credit_service = Arc::new(CreditService::new(
        Arc::new(MySqlCreditRepository::new(db_pool.clone())),
        customer_service.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(credit_service.clone()))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
