use db_evolver::config::DatabaseConfig;
use db_evolver::connection::{DatabaseConnectionFactory, SqliteSchemaConnection};
use db_evolver::store::sqlite::SqliteStore;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestDatabase {
    pub pool: SqlitePool,
    pub store: SqliteStore,
    _dir: TempDir,
}

impl TestDatabase {
    pub async fn new(setup: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("app.db"),
            create_if_missing: true,
            busy_timeout_secs: 5,
        };

        let connection = DatabaseConnectionFactory::<SqliteSchemaConnection>::new(config)
            .create_connection()
            .await
            .unwrap();
        let pool = connection.pool.clone();

        for statement in setup {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }

        TestDatabase {
            store: connection.into_store(),
            pool,
            _dir: dir,
        }
    }
}
