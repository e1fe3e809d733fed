#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Json, Router};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde_json::{Value, json};
use tower::ServiceExt;

use vendorhub_intake::db::{self, AppState, DbPool};
use vendorhub_intake::handlers;
use vendorhub_intake::models::Vendor;
use vendorhub_intake::upstream::MarketClient;
use vendorhub_intake::util::{generate_api_key, hash_api_key};

pub fn memory_pool() -> DbPool {
    // One connection keeps every request on the same in-memory database.
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    db::init_db(&pool.get().unwrap()).unwrap();
    pool
}

pub fn create_test_vendor(pool: &DbPool, name: &str) -> (Vendor, String) {
    let (key, prefix) = generate_api_key();
    let conn = pool.get().unwrap();
    let vendor = db::queries::create_vendor(&conn, name, &hash_api_key(&key), &prefix).unwrap();
    (vendor, key)
}

pub fn app(pool: DbPool, market_base: &str) -> Router {
    let state = AppState {
        db: pool,
        market: MarketClient::new(market_base, "test-token"),
    };
    handlers::router(state)
}

pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response should be valid JSON")
    };
    (status, json)
}

/// A baseline unit-tracked line item with per-device identifier rows.
pub fn mobile_item(quantity: u32, identifiers: &[&str]) -> Value {
    json!({
        "name": "Galaxy A54",
        "brand": "Samsung",
        "model": "A54",
        "category": "mobile",
        "quantity": quantity,
        "min_stock": 1,
        "selling_price": 90000.0,
        "purchase_price": 80000.0,
        "color_mode": "same",
        "color": "Black",
        "devices": identifiers
            .iter()
            .map(|i| json!({ "identifier": i }))
            .collect::<Vec<_>>(),
    })
}

// ============ Marketplace backend stub ============

/// In-process stand-in for the VendorHub marketplace backend. Records every
/// uniqueness check and submission it receives.
#[derive(Clone)]
pub struct MarketStub {
    pub checks: Arc<Mutex<Vec<Vec<String>>>>,
    pub created: Arc<Mutex<Vec<Value>>>,
    pub updated: Arc<Mutex<Vec<(String, Value)>>>,
    /// Response body for the check endpoint; `Null` makes it answer 500.
    pub check_response: Arc<Mutex<Value>>,
    /// Items served by GET /products/{id}.
    pub items: Arc<Mutex<HashMap<String, Value>>>,
}

impl MarketStub {
    pub fn new() -> Self {
        Self {
            checks: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            updated: Arc::new(Mutex::new(Vec::new())),
            check_response: Arc::new(Mutex::new(
                json!({ "unique": true, "duplicates": [], "existing": [] }),
            )),
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn set_check_response(&self, response: Value) {
        *self.check_response.lock().unwrap() = response;
    }

    /// Make the check endpoint answer 500 to simulate an unreachable index.
    pub fn fail_checks(&self) {
        self.set_check_response(Value::Null);
    }
}

async fn stub_check(State(stub): State<MarketStub>, Json(body): Json<Value>) -> Response {
    let identifiers: Vec<String> = body["identifiers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    stub.checks.lock().unwrap().push(identifiers);

    let response = stub.check_response.lock().unwrap().clone();
    if response.is_null() {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    } else {
        Json(response).into_response()
    }
}

async fn stub_create(State(stub): State<MarketStub>, Json(mut body): Json<Value>) -> Json<Value> {
    let id = format!("item-{}", stub.created.lock().unwrap().len() + 1);
    body["id"] = json!(id);
    stub.created.lock().unwrap().push(body.clone());
    Json(body)
}

async fn stub_update(
    State(stub): State<MarketStub>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Json<Value> {
    body["id"] = json!(id.clone());
    stub.updated.lock().unwrap().push((id, body.clone()));
    Json(body)
}

async fn stub_get(State(stub): State<MarketStub>, Path(id): Path<String>) -> Response {
    match stub.items.lock().unwrap().get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn stub_uploads(Json(body): Json<Value>) -> Json<Value> {
    let images: Vec<Value> = body["images"]
        .as_array()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, img)| {
            json!({
                "id": format!("img-{}", i + 1),
                "url": format!(
                    "https://cdn.vendorhub.pk/{}",
                    img["filename"].as_str().unwrap_or("file")
                ),
            })
        })
        .collect();
    Json(json!({ "images": images }))
}

pub async fn spawn_market(stub: MarketStub) -> String {
    let router = Router::new()
        .route("/products/check-imeis", post(stub_check))
        .route("/products", post(stub_create))
        .route("/products/{id}", put(stub_update).get(stub_get))
        .route("/uploads", post(stub_uploads))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
