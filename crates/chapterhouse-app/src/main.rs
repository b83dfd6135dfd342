use chapterhouse_app::app::api::routes;
use chapterhouse_app::config::ConfigHandler;
use chapterhouse_app::db_handler::DbProviderHandler;
use chapterhouse_core::config::load_config;
use chapterhouse_db::db::connection::create_pool;
use chapterhouse_db::db::migrations::run_pending_migrations;
use chapterhouse_service::rotation::parse_timezone;
use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting chapterhouse server");

    let config = load_config()?;

    tracing::info!(
        server = ?config.server,
        lineage = ?config.lineage,
        rotation = ?config.rotation,
        "Configuration loaded"
    );

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let zone = parse_timezone(&config.rotation.timezone)?;
    tracing::info!(timezone = %zone, "Calendar schedules resolve in this zone");

    run_pending_migrations(&config.database.url).await?;

    let pool = create_pool(&config.database).await?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(DbProviderHandler::new(pool))
        .hoop(ConfigHandler::new(config))
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
