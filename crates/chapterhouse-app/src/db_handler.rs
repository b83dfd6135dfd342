use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use chapterhouse_core::error::CoreError;
use chapterhouse_db::db::DbProvider;

/// Database handle as stored in the depot.
pub type SharedDb = Arc<dyn DbProvider + Send + Sync>;

/// Hoop that makes the connection pool available to every handler.
#[derive(Clone)]
pub struct DbProviderHandler {
    provider: SharedDb,
}

impl DbProviderHandler {
    #[must_use]
    pub fn new<T: DbProvider + Send + Sync + 'static>(provider: T) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[async_trait]
impl salvo::Handler for DbProviderHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.provider));
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns an error if no `DbProviderHandler` ran for this request.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<SharedDb> {
    depot.obtain::<SharedDb>().cloned().map_err(|_err| {
        CoreError::InvariantViolation("Database provider not found in depot").into()
    })
}
