//! Integration Tests for the Mutation Coordinator
//!
//! Runs the real coordinator + HTTP remote store stack against an
//! in-process mock remote, including a failure toggle to exercise the
//! rollback contract over actual HTTP.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::RwLock;

use expense_sync::{
    Config, Expense, ExpenseCache, ExpenseDraft, HttpRemoteStore, MutationCoordinator, Outcome,
    SubmissionStatus,
};

// == Mock Remote Store ==

/// Shared state of the in-process remote: a ledger keyed by id, an id
/// counter, and a status-code toggle that makes every call fail.
#[derive(Clone, Default)]
struct MockRemote {
    expenses: Arc<RwLock<HashMap<String, ExpenseDraft>>>,
    next_id: Arc<AtomicU64>,
    fail_with: Arc<RwLock<Option<StatusCode>>>,
}

impl MockRemote {
    async fn seed(&self, id: &str, draft: ExpenseDraft) {
        self.expenses.write().await.insert(id.to_string(), draft);
    }

    async fn fail_all(&self, status: StatusCode) {
        *self.fail_with.write().await = Some(status);
    }

    async fn contains(&self, id: &str) -> bool {
        self.expenses.read().await.contains_key(id)
    }
}

async fn create_expense(
    State(remote): State<MockRemote>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    if let Some(status) = *remote.fail_with.read().await {
        return Err(status);
    }
    let id = remote.next_id.fetch_add(1, Ordering::SeqCst).to_string();
    remote.expenses.write().await.insert(id.clone(), draft);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_expense(
    State(remote): State<MockRemote>,
    Path(id): Path<String>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<StatusCode, StatusCode> {
    if let Some(status) = *remote.fail_with.read().await {
        return Err(status);
    }
    let mut expenses = remote.expenses.write().await;
    if !expenses.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    expenses.insert(id, draft);
    Ok(StatusCode::OK)
}

async fn delete_expense(
    State(remote): State<MockRemote>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    if let Some(status) = *remote.fail_with.read().await {
        return Err(status);
    }
    match remote.expenses.write().await.remove(&id) {
        Some(_) => Ok(StatusCode::OK),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_expenses(
    State(remote): State<MockRemote>,
) -> Result<Json<Vec<Expense>>, StatusCode> {
    if let Some(status) = *remote.fail_with.read().await {
        return Err(status);
    }
    let expenses = remote
        .expenses
        .read()
        .await
        .iter()
        .map(|(id, draft)| Expense::new(id.as_str(), draft.clone()))
        .collect();
    Ok(Json(expenses))
}

/// Starts the mock remote on an ephemeral port.
async fn spawn_mock() -> (MockRemote, String) {
    let remote = MockRemote {
        next_id: Arc::new(AtomicU64::new(42)),
        ..Default::default()
    };

    let app = Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
        .with_state(remote.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (remote, format!("http://{addr}"))
}

// == Helper Functions ==

fn session(base_url: &str) -> (Arc<RwLock<ExpenseCache>>, MutationCoordinator<HttpRemoteStore>) {
    let config = Config {
        base_url: base_url.to_string(),
        request_timeout: 2,
    };
    let store = HttpRemoteStore::new(&config).unwrap();
    let cache = Arc::new(RwLock::new(ExpenseCache::new()));
    let coordinator = MutationCoordinator::new(cache.clone(), store);
    (cache, coordinator)
}

fn draft(description: &str, amount: f64, date: &str) -> ExpenseDraft {
    ExpenseDraft {
        description: description.to_string(),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

// == Create Tests ==

#[tokio::test]
async fn test_create_success_inserts_remote_id_into_cache() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    let lunch = draft("Lunch", 12.0, "2024-02-01");
    let outcome = coordinator.submit(lunch.clone(), None).await;

    assert_eq!(outcome, Outcome::Leave);
    assert_eq!(coordinator.status(), &SubmissionStatus::Idle);

    let cache = cache.read().await;
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.find("42").unwrap().draft(), lunch);
    assert!(remote.contains("42").await);
}

#[tokio::test]
async fn test_create_server_error_leaves_no_orphan() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);
    remote.fail_all(StatusCode::INTERNAL_SERVER_ERROR).await;

    let outcome = coordinator.submit(draft("Lunch", 12.0, "2024-02-01"), None).await;

    assert_eq!(outcome, Outcome::Stay);
    assert!(matches!(coordinator.status(), SubmissionStatus::Failed(_)));
    assert!(cache.read().await.is_empty());
}

#[tokio::test]
async fn test_create_connection_refused_leaves_no_orphan() {
    // Grab an ephemeral port and release it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (cache, mut coordinator) = session(&base_url);

    let outcome = coordinator.submit(draft("Lunch", 12.0, "2024-02-01"), None).await;

    assert_eq!(outcome, Outcome::Stay);
    assert!(matches!(coordinator.status(), SubmissionStatus::Failed(_)));
    assert!(cache.read().await.is_empty());
}

// == Update Tests ==

#[tokio::test]
async fn test_update_success_confirms_optimistic_change() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    remote.seed("1", draft("Coffee", 3.5, "2024-01-01")).await;
    coordinator.load().await.unwrap();

    let tea = draft("Tea", 4.0, "2024-01-01");
    let outcome = coordinator.submit(tea.clone(), Some("1")).await;

    assert_eq!(outcome, Outcome::Leave);
    assert_eq!(cache.read().await.find("1").unwrap().draft(), tea.clone());
    assert_eq!(remote.expenses.read().await.get("1"), Some(&tea));
}

#[tokio::test]
async fn test_update_server_error_rolls_back_cache() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    let coffee = draft("Coffee", 3.5, "2024-01-01");
    remote.seed("1", coffee.clone()).await;
    coordinator.load().await.unwrap();
    remote.fail_all(StatusCode::INTERNAL_SERVER_ERROR).await;

    let outcome = coordinator.submit(draft("Tea", 4.0, "2024-01-01"), Some("1")).await;

    assert_eq!(outcome, Outcome::Stay);
    assert!(matches!(coordinator.status(), SubmissionStatus::Failed(_)));

    // Cache entry is field-for-field the pre-attempt value
    let cache = cache.read().await;
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.find("1").unwrap().draft(), coffee);
}

#[tokio::test]
async fn test_update_gone_remotely_rolls_back_cache() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    // The cache knows the entry but the remote no longer does
    let coffee = draft("Coffee", 3.5, "2024-01-01");
    remote.seed("1", coffee.clone()).await;
    coordinator.load().await.unwrap();
    remote.expenses.write().await.remove("1");

    let outcome = coordinator.submit(draft("Tea", 4.0, "2024-01-01"), Some("1")).await;

    assert_eq!(outcome, Outcome::Stay);
    assert!(matches!(coordinator.status(), SubmissionStatus::Failed(_)));
    assert_eq!(cache.read().await.find("1").unwrap().draft(), coffee);
}

// == Delete Tests ==

#[tokio::test]
async fn test_delete_success_removes_everywhere() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    remote.seed("7", draft("Dinner", 20.0, "2024-03-01")).await;
    coordinator.load().await.unwrap();

    let outcome = coordinator.delete("7").await;

    assert_eq!(outcome, Outcome::Leave);
    assert!(cache.read().await.is_empty());
    assert!(!remote.contains("7").await);
}

#[tokio::test]
async fn test_delete_server_error_restores_entry() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    let dinner = draft("Dinner", 20.0, "2024-03-01");
    remote.seed("7", dinner.clone()).await;
    coordinator.load().await.unwrap();
    remote.fail_all(StatusCode::INTERNAL_SERVER_ERROR).await;

    let outcome = coordinator.delete("7").await;

    assert_eq!(outcome, Outcome::Stay);
    assert!(matches!(coordinator.status(), SubmissionStatus::Failed(_)));
    assert_eq!(cache.read().await.find("7").unwrap().draft(), dinner);
}

// == Session Load Tests ==

#[tokio::test]
async fn test_load_sorts_newest_first() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, coordinator) = session(&base_url);

    remote.seed("1", draft("Coffee", 3.5, "2024-01-01")).await;
    remote.seed("2", draft("Dinner", 20.0, "2024-03-01")).await;
    remote.seed("3", draft("Lunch", 12.0, "2024-02-01")).await;

    coordinator.load().await.unwrap();

    let cache = cache.read().await;
    let ids: Vec<&str> = cache.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "1"]);
    assert!((cache.total() - 35.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_retry_after_failure_over_http() {
    let (remote, base_url) = spawn_mock().await;
    let (cache, mut coordinator) = session(&base_url);

    let coffee = draft("Coffee", 3.5, "2024-01-01");
    remote.seed("1", coffee.clone()).await;
    coordinator.load().await.unwrap();

    // First attempt fails and rolls back
    remote.fail_all(StatusCode::SERVICE_UNAVAILABLE).await;
    let tea = draft("Tea", 4.0, "2024-01-01");
    assert_eq!(coordinator.submit(tea.clone(), Some("1")).await, Outcome::Stay);
    assert_eq!(cache.read().await.find("1").unwrap().draft(), coffee);

    // Remote recovers; the retry re-reads the reverted cache and succeeds
    *remote.fail_with.write().await = None;
    assert_eq!(coordinator.submit(tea.clone(), Some("1")).await, Outcome::Leave);
    assert_eq!(coordinator.status(), &SubmissionStatus::Idle);
    assert_eq!(cache.read().await.find("1").unwrap().draft(), tea);
}
