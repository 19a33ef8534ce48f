//! End-to-end transports over the in-memory driver.
//!
//! Exercises the full chain: `read` command as source, parameter binding
//! against the destination schema, `append` command as sink, with status
//! reports and table contents checked after the fact.

use std::sync::{Arc, Mutex};

use ferry_db::{DataProvider, SharedCommand, close_quietly, share, standard_transport};
use ferry_db_memory::MemoryProvider;
use ferry_transport::{ActionStatus, Progress, ResultCode, StatusCode, TransportContext};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

const COLUMNS: [&str; 3] = ["id", "name", "amount"];

async fn seeded(rows: Vec<Vec<Value>>) -> (MemoryProvider, SharedCommand, SharedCommand) {
    let provider = MemoryProvider::new();
    provider.create_table("orders_src", COLUMNS);
    provider.create_table("orders_dst", COLUMNS);
    provider.seed_rows("orders_src", rows).unwrap();

    let conn = provider.connect().await.unwrap();
    let source = share(conn.command("read orders_src").await.unwrap());
    let destination = share(conn.command("append orders_dst").await.unwrap());
    (provider, source, destination)
}

fn collecting_progress() -> (Arc<dyn Progress>, Arc<Mutex<Vec<StatusCode>>>) {
    let seen: Arc<Mutex<Vec<StatusCode>>> = Arc::new(Mutex::new(Vec::new()));
    let into = Arc::clone(&seen);
    let progress: Arc<dyn Progress> = Arc::new(move |status: ActionStatus| {
        into.lock().unwrap().push(status.code());
    });
    (progress, seen)
}

// ---------------------------------------------------------------------------
// Moving rows
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn moves_all_rows_between_tables() {
    let rows = vec![
        vec![json!(1), json!("a"), json!(1.5)],
        vec![json!(2), json!("b"), json!(2.5)],
        vec![json!(3), json!("c"), json!(3.5)],
    ];
    let (provider, source, destination) = seeded(rows.clone()).await;
    let (progress, reports) = collecting_progress();

    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    action.setup().await.unwrap();
    let result = action.execute(progress).join().await.unwrap();

    assert_eq!(result.code(), ResultCode::Success);
    assert_eq!(
        *reports.lock().unwrap(),
        vec![StatusCode::NotStarted, StatusCode::Done]
    );
    assert_eq!(provider.table_rows("orders_dst").unwrap(), rows);
}

#[tokio::test(flavor = "multi_thread")]
async fn binding_round_trip_preserves_typed_values() {
    let (provider, source, destination) =
        seeded(vec![vec![json!(7), json!("x"), json!(12.5)]]).await;
    let (progress, _) = collecting_progress();

    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    action.setup().await.unwrap();
    action.execute(progress).join().await.unwrap();

    assert_eq!(
        provider.table_rows("orders_dst").unwrap(),
        vec![vec![json!(7), json!("x"), json!(12.5)]]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn rerun_with_fresh_commands_observes_new_rows() {
    let first = vec![vec![json!(1), json!("a"), json!(1.5)]];
    let (provider, source, destination) = seeded(first).await;
    let (progress, _) = collecting_progress();

    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    action.setup().await.unwrap();
    action.execute(progress).join().await.unwrap();
    assert_eq!(provider.table_rows("orders_dst").unwrap().len(), 1);

    // The action was consumed; a rerun is a rebuild with fresh commands,
    // and its source query sees the table as it is now.
    provider
        .seed_rows("orders_src", vec![vec![json!(2), json!("b"), json!(2.5)]])
        .unwrap();
    let conn = provider.connect().await.unwrap();
    let source = share(conn.command("read orders_src").await.unwrap());
    let destination = share(conn.command("append orders_dst").await.unwrap());
    let (progress, _) = collecting_progress();

    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    action.setup().await.unwrap();
    action.execute(progress).join().await.unwrap();

    assert_eq!(provider.table_rows("orders_dst").unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Setup failures
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn setup_failure_leaves_the_destination_untouched() {
    let provider = MemoryProvider::new();
    // Destination exists, source table does not.
    provider.create_table("orders_dst", COLUMNS);
    let conn = provider.connect().await.unwrap();
    let source = share(conn.command("read orders_src").await.unwrap());
    let destination = share(conn.command("append orders_dst").await.unwrap());

    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    let err = action.setup().await.unwrap_err();

    assert!(err.is_setup());
    assert!(err.to_string().contains("no such table 'orders_src'"));
    assert!(provider.table_rows("orders_dst").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Session teardown
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn close_quietly_is_idempotent_over_the_session() {
    let (provider, source, destination) =
        seeded(vec![vec![json!(1), json!("a"), json!(1.5)]]).await;
    let (progress, _) = collecting_progress();

    let mut conn = provider.connect().await.unwrap();
    let mut action = standard_transport(
        "orders-move".parse().unwrap(),
        Arc::new(provider.clone()),
        source,
        destination,
        TransportContext::new(),
    );
    action.setup().await.unwrap();
    action.execute(progress).join().await.unwrap();

    close_quietly(Some(conn.as_mut())).await;
    close_quietly(Some(conn.as_mut())).await;
    assert!(conn.command("read orders_src").await.is_err());
}
