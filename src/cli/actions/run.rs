use super::Action;
use crate::{
    probe::{DatabaseProbe, mongo::MongoStore, mysql::MySqlSource},
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::info;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Serve {
            mysql_dsn,
            tls,
            mongodb_uri,
            mongodb_database,
            collection,
            listen,
            port,
        } => {
            let relational = MySqlSource::from_dsn(&mysql_dsn, &tls)?;
            let documents = MongoStore::connect(&mongodb_uri, mongodb_database.as_deref()).await?;
            let database = documents.database();

            info!(
                mysql_tls = tls.mode.is_enabled(),
                mongodb_database = database.as_deref().unwrap_or("<from seed list>"),
                collection = %collection,
                "database probe configured"
            );

            let probe = DatabaseProbe::new(relational, documents).with_collection(collection);

            server::start(AppState::new(Arc::new(probe)), listen, port).await
        }
    }
}
