//! Storage layer tests for the Warpline daemon.

use super::db::{DatabaseError, WarplineDatabase};
use super::models::{Account, AccountUpdate, EndpointRecord};

async fn test_db() -> WarplineDatabase {
    WarplineDatabase::open_in_memory().await.unwrap()
}

fn account(id: &str, created_at: &str) -> Account {
    Account {
        account_id: id.to_string(),
        account_type: "free".to_string(),
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
        model: "PC".to_string(),
        referrer: String::new(),
        private_key: format!("{id}-private"),
        license_key: "lic-1".to_string(),
        token: format!("{id}-token"),
        premium_data: 0,
        quota: 0,
        usage: 0,
    }
}

fn endpoint(address: &str, loss: &str, delay: &str) -> EndpointRecord {
    EndpointRecord {
        address: address.to_string(),
        loss: loss.to_string(),
        delay: delay.to_string(),
        name: format!("{address}-name"),
        unique_name: format!("{address}-unique"),
    }
}

// === Account tests ===

#[tokio::test]
async fn empty_database_has_no_latest_account() {
    let db = test_db().await;
    assert!(db.fetch_latest_account().await.unwrap().is_none());
}

#[tokio::test]
async fn create_and_get_account() {
    let db = test_db().await;
    let original = account("a1", "2026-01-01T00:00:00.000Z");
    db.create_account(&original).await.unwrap();

    let stored = db.get_account("a1").await.unwrap();
    assert_eq!(stored, original);
}

#[tokio::test]
async fn get_missing_account_is_not_found() {
    let db = test_db().await;
    let err = db.get_account("ghost").await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));
}

#[tokio::test]
async fn latest_account_orders_by_created_at() {
    let db = test_db().await;
    db.create_account(&account("old", "2025-06-01T00:00:00.000Z"))
        .await
        .unwrap();
    db.create_account(&account("new", "2026-02-01T00:00:00.000Z"))
        .await
        .unwrap();
    db.create_account(&account("mid", "2025-12-01T00:00:00.000Z"))
        .await
        .unwrap();

    let latest = db.fetch_latest_account().await.unwrap().unwrap();
    assert_eq!(latest.account_id, "new");
}

#[tokio::test]
async fn duplicate_account_id_is_rejected() {
    let db = test_db().await;
    db.create_account(&account("a1", "2026-01-01T00:00:00.000Z"))
        .await
        .unwrap();
    let err = db
        .create_account(&account("a1", "2026-01-02T00:00:00.000Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Query(_)));
}

#[tokio::test]
async fn negative_quota_is_rejected() {
    let db = test_db().await;
    let mut bad = account("a1", "2026-01-01T00:00:00.000Z");
    bad.quota = -1;
    assert!(db.create_account(&bad).await.is_err());
}

#[tokio::test]
async fn update_touches_only_mutable_fields() {
    let db = test_db().await;
    let original = account("a1", "2026-01-01T00:00:00.000Z");
    db.create_account(&original).await.unwrap();

    let rows = db
        .update_account(&AccountUpdate {
            account_id: "a1".to_string(),
            license_key: "lic-2".to_string(),
            premium_data: 7,
            quota: 1_000,
            usage: 250,
            updated_at: "2026-03-01T00:00:00.000Z".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let stored = db.get_account("a1").await.unwrap();
    assert_eq!(stored.license_key, "lic-2");
    assert_eq!(stored.premium_data, 7);
    assert_eq!(stored.quota, 1_000);
    assert_eq!(stored.usage, 250);
    assert_eq!(stored.updated_at, "2026-03-01T00:00:00.000Z");

    assert_eq!(stored.private_key, original.private_key);
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(stored.account_type, original.account_type);
    assert_eq!(stored.model, original.model);
    assert_eq!(stored.referrer, original.referrer);
    assert_eq!(stored.token, original.token);
}

#[tokio::test]
async fn update_unknown_account_affects_zero_rows() {
    let db = test_db().await;
    db.create_account(&account("a1", "2026-01-01T00:00:00.000Z"))
        .await
        .unwrap();

    let rows = db
        .update_account(&AccountUpdate {
            account_id: "nope".to_string(),
            license_key: "x".to_string(),
            premium_data: 1,
            quota: 1,
            usage: 1,
            updated_at: "2026-03-01T00:00:00.000Z".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(rows, 0);
    assert_eq!(db.get_account("a1").await.unwrap().license_key, "lic-1");
}

// === Endpoint tests ===

#[tokio::test]
async fn endpoints_come_back_in_insertion_order() {
    let db = test_db().await;
    for address in ["9.9.9.9:2408", "1.1.1.1:2408", "5.5.5.5:500"] {
        db.upsert_endpoint(&endpoint(address, "1%", "10ms"))
            .await
            .unwrap();
    }

    let rows = db.fetch_endpoints().await.unwrap();
    let addresses: Vec<_> = rows.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(addresses, ["9.9.9.9:2408", "1.1.1.1:2408", "5.5.5.5:500"]);
}

#[tokio::test]
async fn upsert_refreshes_metrics_in_place() {
    let db = test_db().await;
    db.upsert_endpoint(&endpoint("1.1.1.1:2408", "1%", "10ms"))
        .await
        .unwrap();
    db.upsert_endpoint(&endpoint("2.2.2.2:2408", "2%", "20ms"))
        .await
        .unwrap();
    db.upsert_endpoint(&endpoint("1.1.1.1:2408", "30%", "900ms"))
        .await
        .unwrap();

    let rows = db.fetch_endpoints().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].address, "1.1.1.1:2408");
    assert_eq!(rows[0].loss, "30%");
    assert_eq!(rows[0].delay, "900ms");
}

#[test]
fn account_debug_redacts_secrets() {
    let a = account("a1", "2026-01-01T00:00:00.000Z");
    let debug = format!("{a:?}");
    assert!(!debug.contains("a1-private"));
    assert!(!debug.contains("a1-token"));
    assert!(debug.contains("[REDACTED]"));
}
