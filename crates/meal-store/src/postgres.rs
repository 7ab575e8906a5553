use async_trait::async_trait;
use meal::Meal;
use sqlx::{Connection, PgConnection, PgPool, Row, postgres::PgRow};

use crate::{
    PersistenceError, PostgresConfig, ProvisioningWarning, Result, store::MealStore,
};

const CREATE_MEALS_TABLE: &str = include_str!("../migrations/001_create_meals_table.sql");

/// PostgreSQL-backed meal store.
///
/// Concurrency is delegated to the connection pool: each operation acquires
/// one pooled connection, waiting up to the pool's acquire timeout.
#[derive(Clone)]
pub struct PostgresMealStore {
    pool: PgPool,
}

impl PostgresMealStore {
    /// Creates a new PostgreSQL meal store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the connection pool and provisions the meals table.
    ///
    /// The pool connects lazily, so an unreachable database surfaces as a
    /// provisioning failure. That failure is logged and ignored unless
    /// `config.strict_provisioning` is set, in which case it is returned.
    #[tracing::instrument(skip(config), fields(host = %config.host, port = config.port, database = %config.database))]
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = config
            .pool_options()
            .connect_lazy_with(config.connect_options());
        let store = Self::new(pool);

        if let Some(warning) = store.provision().await
            && config.strict_provisioning
        {
            return Err(warning.into_inner());
        }

        Ok(store)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the meals table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<()> {
        match sqlx::raw_sql(CREATE_MEALS_TABLE).execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::PoolTimedOut) => Err(self.diagnose_timeout().await),
            Err(err) => Err(err.into()),
        }
    }

    /// The pool reports a failing host as a timeout; one direct connection
    /// attempt recovers the underlying connect error.
    async fn diagnose_timeout(&self) -> PersistenceError {
        let options = self.pool.connect_options();
        match PgConnection::connect_with(&options).await {
            Ok(conn) => {
                let _ = conn.close().await;
                PersistenceError::PoolExhausted
            }
            Err(source) => PersistenceError::Unreachable(source),
        }
    }

    /// Runs [`ensure_table`](Self::ensure_table), downgrading a failure to a
    /// logged warning.
    pub async fn provision(&self) -> Option<ProvisioningWarning> {
        match self.ensure_table().await {
            Ok(()) => {
                tracing::info!("meals table ready");
                None
            }
            Err(source) => {
                let warning = ProvisioningWarning { source };
                tracing::warn!(error = %warning, "table provisioning failed, continuing startup");
                Some(warning)
            }
        }
    }

    fn row_to_meal(row: PgRow) -> Result<Meal> {
        let name: String = row.try_get("name")?;
        let photo: Vec<u8> = row.try_get("photo")?;
        let rating: i64 = row.try_get("rating")?;
        Meal::new(name, photo, rating).map_err(PersistenceError::from)
    }
}

#[async_trait]
impl MealStore for PostgresMealStore {
    #[tracing::instrument(skip(self, meal), fields(name = %meal.name()))]
    async fn put(&self, meal: Meal) -> Result<Meal> {
        let row = sqlx::query(
            r#"
            INSERT INTO meals (name, photo, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET
                photo = EXCLUDED.photo,
                rating = EXCLUDED.rating
            RETURNING name, photo, rating
            "#,
        )
        .bind(meal.name())
        .bind(meal.photo())
        .bind(meal.rating())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_meal(row)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Meal>> {
        let rows = sqlx::query("SELECT name, photo, rating FROM meals")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_meal).collect()
    }
}
