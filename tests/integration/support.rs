//! In-process stub of the hotel backend
//!
//! Responses are canned per `"<METHOD> <path>"` key and every request is
//! recorded so tests can assert on what was (or was not) sent.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};

use hotel_desk::{config::ApiConfig, storage::LocalStorage, AppConfig, AppState};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<String, (StatusCode, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub backend stopped");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        let status = StatusCode::from_u16(status).expect("Invalid status");
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .last()
    }

    /// Application state pointed at this stub, with in-memory storage
    pub fn app(&self) -> AppState {
        self.app_with(LocalStorage::in_memory())
    }

    pub fn app_with(&self, storage: LocalStorage) -> AppState {
        let config = AppConfig {
            api: ApiConfig {
                base_url: self.base_url(),
                timeout_secs: 5,
            },
            ..Default::default()
        };
        AppState::new(config, storage).expect("Failed to build app state")
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().trim_start_matches("/api/").to_string();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let key = format!("{} {}", method, path);
    match state.routes.lock().unwrap().get(&key) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("no stub for {}", key) })),
        ),
    }
}

pub fn admin_user() -> Value {
    json!({
        "id": 1,
        "username": "admin",
        "ho_ten": "Quản trị viên",
        "vai_tro": "admin"
    })
}

pub fn rooms() -> Value {
    json!([
        { "id": 1, "so_phong": "101", "so_tang": 1, "loai_phong_id": 1, "trang_thai": "trống" },
        { "id": 2, "so_phong": 102, "so_tang": 1, "loai_phong_id": 1, "trang_thai": "đang sử dụng" },
        { "id": 3, "so_phong": "201", "so_tang": 2, "loai_phong_id": 2, "trang_thai": "đang dọn" }
    ])
}

/// Two bookings claim room 2; the client takes the first one listed
pub fn bookings() -> Value {
    json!([
        { "id": 5, "khach_hang_id": 7, "phong_id": 2, "thoi_gian_vao": "2024-03-01T14:00:00", "trang_thai": "đã nhận" },
        { "id": 3, "khach_hang_id": 8, "phong_id": 2, "thoi_gian_vao": "2024-02-27T09:00:00", "trang_thai": "đã nhận" },
        { "id": 2, "khach_hang_id": 8, "phong_id": 1, "trang_thai": "đã trả" }
    ])
}

/// Stub every collection the dashboard loads
pub fn stub_dashboard(stub: &StubBackend) {
    stub.on("GET", "rooms", 200, rooms())
        .on("GET", "bookings", 200, bookings())
        .on(
            "GET",
            "room-types",
            200,
            json!({ "data": [
                { "id": 1, "ten_loai_phong": "Phòng đơn", "gia_qua_dem": "350000" },
                { "id": 2, "ten_loai_phong": "Phòng đôi", "gia_qua_dem": 500000 }
            ]}),
        )
        .on(
            "GET",
            "customers",
            200,
            json!([
                { "id": 7, "ho_ten": "Nguyễn Văn An", "cmnd": "012345678901" },
                { "id": 8, "ho_ten": "Trần Thị Bình", "cmnd": "123456789" }
            ]),
        )
        .on(
            "GET",
            "services",
            200,
            json!([
                { "id": 1, "ten_dich_vu": "Nước suối", "gia": 10000 },
                { "id": 2, "ten_dich_vu": "Giặt ủi", "gia": "50000" }
            ]),
        );
}
