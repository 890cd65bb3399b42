//! These tests need a live PostgreSQL reachable through `DATABASE_URL`.
//! Run them with `cargo test -- --ignored`.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use ticker::repository::{RepositoryError, RepositoryProvider, Warehouse};
use ticker::settings::Setup;
use ticker::ticker::Ticker;

// Every test shares the records table, so they must not interleave.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

async fn warehouse() -> Warehouse {
    let setup = Setup::from_env();
    let repo = Warehouse::new(setup.get_connection_str(), setup.get_acquire_timeout())
        .await
        .expect("cannot connect to database");
    repo.migrate().await.expect("cannot migrate database");
    repo
}

#[tokio::test]
#[ignore]
async fn integration_migrate_is_idempotent() {
    let _guard = serial();
    let repo = warehouse().await;

    let before = repo.count_records().await.expect("cannot count records");
    repo.migrate().await.expect("second migration failed");
    let after = repo.count_records().await.expect("cannot count records");

    assert_eq!(before, after);

    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn integration_count_grows_by_one_per_insert() {
    let _guard = serial();
    let repo = warehouse().await;

    let mut last = repo.count_records().await.expect("cannot count records");
    for i in 0..5 {
        repo.insert_record(&format!("integration count #{}", i))
            .await
            .expect("cannot insert record");
        let now = repo.count_records().await.expect("cannot count records");
        assert_eq!(now, last + 1);
        last = now;
    }

    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn integration_recent_records_newest_first() {
    let _guard = serial();
    let repo = warehouse().await;

    for i in 0..4 {
        repo.insert_record(&format!("integration recent #{}", i))
            .await
            .expect("cannot insert record");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let recent = repo.recent_records(3).await.expect("cannot read records");

    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].message, "integration recent #3");
    assert_eq!(recent[1].message, "integration recent #2");
    assert_eq!(recent[2].message, "integration recent #1");
    assert!(recent
        .windows(2)
        .all(|w| w[0].timestamp >= w[1].timestamp && w[0].id > w[1].id));

    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn integration_empty_message_rejected() {
    let _guard = serial();
    let repo = warehouse().await;

    let before = repo.count_records().await.expect("cannot count records");
    let result = repo.insert_record("").await;
    let after = repo.count_records().await.expect("cannot count records");

    assert!(matches!(result, Err(RepositoryError::Insert(_))));
    assert_eq!(before, after);

    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn integration_ticker_reports_against_database() {
    let _guard = serial();
    let repo = warehouse().await;
    let mut ticker = Ticker::new(repo.clone(), &Setup::default());

    let before = repo.count_records().await.expect("cannot count records");
    let mut reports = Vec::new();
    for _ in 0..5 {
        reports.push(ticker.tick().await);
    }

    assert!(reports.iter().all(|r| r.inserted));
    assert_eq!(reports[4].total, Some(before + 5));

    let recent = reports[4].recent.as_ref().expect("fifth tick lists records");
    assert_eq!(recent.len(), 3);
    assert!(recent[0].message.starts_with("Entry #5 - "));
    assert!(recent[1].message.starts_with("Entry #4 - "));
    assert!(recent[2].message.starts_with("Entry #3 - "));

    repo.close().await;
}
