//! Integration tests for `DieselRegionRepository` against a live PostgreSQL.
//!
//! Set `PIXELWALL_TEST_DATABASE_URL` to run them; without it each test logs
//! a skip notice and returns. The database is migrated on first use and rows
//! are never deleted, so assertions only concern rows created by the test.

use pixelwall::domain::ports::{RegionRepository, RegionRepositoryError};
use pixelwall::domain::{AssetRef, NewRegion, Placement};
use pixelwall::outbound::persistence::{
    DbPool, DieselRegionRepository, PoolConfig, run_pending_migrations,
};
use rstest::rstest;

const DATABASE_URL_ENV: &str = "PIXELWALL_TEST_DATABASE_URL";

async fn repository() -> Option<DieselRegionRepository> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-CLUSTER: {DATABASE_URL_ENV} not set");
        return None;
    };
    run_pending_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url)).await.expect("pool builds");
    Some(DieselRegionRepository::new(pool))
}

fn new_region(x: i32, y: i32, name: &str) -> NewRegion {
    NewRegion {
        placement: Placement::new(x, y, 100).expect("valid placement"),
        image: AssetRef::parse(name).expect("valid reference"),
    }
}

#[rstest]
#[tokio::test]
async fn create_assigns_increasing_ids_and_lists_in_order() {
    let Some(repo) = repository().await else {
        return;
    };

    let first = repo
        .create(new_region(-5, 700, "1700000000000-a.png"))
        .await
        .expect("first insert");
    let second = repo
        .create(new_region(5, 5, "1700000000000-b.png"))
        .await
        .expect("second insert");
    assert!(second.id() > first.id());

    let listed = repo.list_all().await.expect("list regions");
    let ids: Vec<_> = listed.iter().map(|region| region.id()).collect();
    let first_pos = ids.iter().position(|id| *id == first.id()).expect("first listed");
    let second_pos = ids.iter().position(|id| *id == second.id()).expect("second listed");
    assert!(first_pos < second_pos);
    assert_eq!(listed[first_pos], first);
    assert_eq!(listed[first_pos].placement().x(), -5);
}

#[rstest]
#[tokio::test]
async fn unreachable_database_maps_to_connection_error() {
    let pool = DbPool::new(
        PoolConfig::new("postgres://pixelwall@127.0.0.1:1/pixelwall")
            .with_connection_timeout(std::time::Duration::from_millis(200)),
    )
    .await
    .expect("lazy pool builds");
    let repo = DieselRegionRepository::new(pool);

    let err = repo.list_all().await.expect_err("no database listening");
    assert!(matches!(err, RegionRepositoryError::Connection { .. }));
}
