use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chapterhouse_core::config::DatabaseConfig;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::db::DbProvider;
use crate::error::DbResult;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// Upper bound on waiting for a pooled connection before the request fails.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// ## Summary
/// Creates the shared connection pool from the database settings.
///
/// Connections are opened lazily. The first request that needs one surfaces
/// any connection failure.
///
/// ## Errors
/// Returns an error if the pool cannot be built from the provided URL.
#[tracing::instrument(skip(config), fields(pool_size = config.max_connections))]
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<DbPool> {
    let size = u32::from(config.max_connections.max(1));
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

    let pool = Pool::builder()
        .max_size(size)
        .connection_timeout(CHECKOUT_TIMEOUT)
        .test_on_check_out(true)
        .build(manager)
        .await?;

    tracing::info!(pool_size = size, "Database connection pool created");

    Ok(pool)
}

impl DbProvider for DbPool {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>> {
        Box::pin(async move {
            let conn = self.get().await?;
            Ok(conn)
        })
    }
}
