use std::sync::Arc;

use post_service::config::Config;
use post_service::domain::post::ports::PostServicePort;
use post_service::domain::post::service::PostService;
use post_service::inbound::grpc::PostGrpcService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::grpc::GrpcAuthorizationClient;
use post_service::outbound::repositories::PostgresPostRepository;
use post_service::proto::post::post_service_server::PostServiceServer;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tonic::codegen::http;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "post-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        user_service_url = %config.user_service.grpc_url,
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

    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));
    let authorizer = Arc::new(GrpcAuthorizationClient::new(
        &config.user_service.grpc_url,
        config.user_service.timeout(),
    )?);
    tracing::info!(
        url = %config.user_service.grpc_url,
        timeout_ms = config.user_service.timeout_ms,
        "Authorization client configured"
    );

    let post_service: Arc<dyn PostServicePort> =
        Arc::new(PostService::new(post_repository, authorizer));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&post_service));
    let http_shutdown = shutdown_rx.clone();
    let http_server = tokio::spawn(async move {
        axum::serve(http_listener, http_application)
            .with_graceful_shutdown(wait_for_shutdown(http_shutdown))
            .await
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = PostGrpcService::new(Arc::clone(&post_service));
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .trace_fn(|request: &http::Request<()>| {
                tracing::info_span!("grpc_request", path = %request.uri().path())
            })
            .add_service(PostServiceServer::new(grpc_service))
            .serve_with_shutdown(grpc_address, wait_for_shutdown(shutdown_rx))
            .await
    });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((http_result, grpc_result)) => {
            if let Err(e) = http_result {
                tracing::error!(error = %e, protocol = "http", "Server error");
            }
            if let Err(e) = grpc_result {
                tracing::error!(error = %e, protocol = "grpc", "Server error");
            }
            tracing::info!("Servers exited");
        }
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    };

    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
