//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container and run serially. Run with:
//!
//! ```bash
//! cargo test -p meal-store --test postgres_integration
//! ```

use std::sync::Arc;
use std::time::Duration;

use meal::Meal;
use meal_store::{MealStore, PersistenceError, PostgresConfig, PostgresMealStore};
use serial_test::serial;
use sqlx::postgres::PgPoolOptions;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    config: PostgresConfig,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let config = PostgresConfig {
                host: host.to_string(),
                port,
                database: "postgres".to_string(),
                user: "postgres".to_string(),
                password: "postgres".to_string(),
                pool_initial: 1,
                pool_max: 5,
                acquire_timeout: Duration::from_secs(5),
                strict_provisioning: true,
            };

            Arc::new(ContainerInfo { container, config })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and an empty meals table
async fn get_test_store() -> PostgresMealStore {
    let info = get_container_info().await;

    let store = PostgresMealStore::connect(&info.config).await.unwrap();

    sqlx::query("TRUNCATE TABLE meals")
        .execute(store.pool())
        .await
        .unwrap();

    store
}

/// Config pointing at a port nothing listens on.
fn unreachable_config(strict_provisioning: bool) -> PostgresConfig {
    PostgresConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        acquire_timeout: Duration::from_secs(2),
        strict_provisioning,
        ..PostgresConfig::default()
    }
}

fn meal(name: &str, rating: i64) -> Meal {
    Meal::new(name, format!("photo of {name}").into_bytes(), rating).unwrap()
}

#[tokio::test]
#[serial]
async fn put_and_get_all() {
    let store = get_test_store().await;
    let caprese = meal("Caprese Salad", 4);

    let stored = store.put(caprese.clone()).await.unwrap();
    assert_eq!(stored, caprese);

    let all = store.get_all().await.unwrap();
    assert_eq!(all, vec![caprese]);
}

#[tokio::test]
#[serial]
async fn put_preserves_binary_photo() {
    let store = get_test_store().await;
    let photo: Vec<u8> = (0..=255).collect();
    let pie = Meal::new("Pie", photo.clone(), 5).unwrap();

    store.put(pie).await.unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(all[0].photo(), photo.as_slice());
}

#[tokio::test]
#[serial]
async fn put_with_existing_name_replaces_row() {
    let store = get_test_store().await;
    store.put(meal("Pancakes", 2)).await.unwrap();

    let replacement = Meal::new("Pancakes", vec![1, 2, 3], 5).unwrap();
    let stored = store.put(replacement.clone()).await.unwrap();
    assert_eq!(stored, replacement);

    let all = store.get_all().await.unwrap();
    assert_eq!(all, vec![replacement]);
}

#[tokio::test]
#[serial]
async fn repeated_identical_puts_are_idempotent() {
    let store = get_test_store().await;
    let toast = meal("Toast", 0);

    store.put(toast.clone()).await.unwrap();
    store.put(toast.clone()).await.unwrap();

    assert_eq!(store.get_all().await.unwrap(), vec![toast]);
}

#[tokio::test]
#[serial]
async fn concurrent_puts_with_distinct_names() {
    let store = get_test_store().await;

    let writes = (0..40).map(|i| {
        let store = store.clone();
        async move { store.put(meal(&format!("Meal {i}"), i % 6)).await }
    });
    for result in futures_util::future::join_all(writes).await {
        result.unwrap();
    }

    let mut all = store.get_all().await.unwrap();
    assert_eq!(all.len(), 40);
    all.sort_by_key(|m| m.name().trim_start_matches("Meal ").parse::<i64>().unwrap());
    for (i, stored) in all.iter().enumerate() {
        assert_eq!(stored, &meal(&format!("Meal {i}"), i as i64 % 6));
    }
}

#[tokio::test]
#[serial]
async fn provisioning_existing_table_is_not_an_error() {
    let store = get_test_store().await;

    store.ensure_table().await.unwrap();
    assert!(store.provision().await.is_none());
}

#[tokio::test]
#[serial]
async fn provisioning_failure_is_reported_as_warning() {
    let store = get_test_store().await;
    store.pool().close().await;

    let warning = store.provision().await;
    assert!(warning.is_some());
}

#[tokio::test]
#[serial]
async fn table_constraint_violation_is_classified() {
    let store = get_test_store().await;

    let err = sqlx::query("INSERT INTO meals (name, photo, rating) VALUES ('Soup', '', 9)")
        .execute(store.pool())
        .await
        .map_err(PersistenceError::from)
        .unwrap_err();

    match err {
        PersistenceError::ConstraintViolation { constraint } => {
            assert_eq!(constraint, "meals_rating_check");
        }
        other => panic!("expected constraint violation, got {other:?}"),
    }
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn exhausted_pool_times_out() {
    let info = get_container_info().await;
    get_test_store().await;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(200))
        .connect_with(info.config.connect_options())
        .await
        .unwrap();
    let store = PostgresMealStore::new(pool);

    let _held = store.pool().acquire().await.unwrap();
    let err = store.get_all().await.unwrap_err();
    assert!(matches!(err, PersistenceError::PoolExhausted));
}

#[tokio::test]
async fn unreachable_database_only_warns_by_default() {
    let store = PostgresMealStore::connect(&unreachable_config(false)).await;
    assert!(store.is_ok(), "startup should continue: {:?}", store.err());
}

#[tokio::test]
async fn unreachable_database_fails_strict_startup() {
    let err = PostgresMealStore::connect(&unreachable_config(true))
        .await
        .err()
        .expect("strict provisioning must abort startup");

    assert!(
        matches!(err, PersistenceError::Unreachable(_)),
        "expected unreachable database, got {err:?}"
    );
}
