//! In-process mock of the remote service for client integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use serde_json::{Value, json};

/// Token the mock issues to the seeded admin account.
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token the mock issues to the seeded member account.
pub const MEMBER_TOKEN: &str = "member-token";

#[derive(Default)]
struct BoardState {
    requests: Vec<Value>,
    users: Vec<Value>,
    next_request_id: i64,
    next_comment_id: i64,
}

/// Shared mock state behind the router.
pub struct MockService {
    state: RwLock<BoardState>,
}

struct AuthUser {
    id: i64,
    username: String,
    is_admin: bool,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(headers: &HeaderMap) -> Option<AuthUser> {
    match bearer(headers)? {
        ADMIN_TOKEN => Some(AuthUser {
            id: 1,
            username: "admin".to_string(),
            is_admin: true,
        }),
        MEMBER_TOKEN => Some(AuthUser {
            id: 2,
            username: "maria".to_string(),
            is_admin: false,
        }),
        _ => None,
    }
}

fn admin_user_json() -> Value {
    json!({
        "id": 1,
        "username": "admin",
        "nome_completo": "Administrator",
        "email": "admin@example.com",
        "is_admin": true
    })
}

fn member_user_json() -> Value {
    json!({
        "id": 2,
        "username": "maria",
        "nome_completo": "Maria Silva",
        "email": "maria@example.com",
        "is_admin": false
    })
}

fn user_json(user: &AuthUser) -> Value {
    if user.id == 1 { admin_user_json() } else { member_user_json() }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn unauthenticated() -> Response {
    error(StatusCode::UNAUTHORIZED, "invalid or expired token")
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (token, user) = match (username, password) {
        ("admin", "admin123") => (ADMIN_TOKEN, admin_user_json()),
        ("maria", "maria123") => (MEMBER_TOKEN, member_user_json()),
        _ => return error(StatusCode::UNAUTHORIZED, "invalid credentials"),
    };

    Json(json!({ "token": token, "user": user })).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    if username == "taken" {
        return error(StatusCode::BAD_REQUEST, "username already registered");
    }

    let user = json!({
        "id": 99,
        "username": username,
        "nome_completo": body["nome_completo"],
        "email": body["email"],
        "is_admin": false
    });
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn verify_token(headers: HeaderMap) -> Response {
    match authenticate(&headers) {
        Some(user) => Json(json!({ "user": user_json(&user) })).into_response(),
        None => unauthenticated(),
    }
}

async fn list_requests(State(mock): State<Arc<MockService>>, headers: HeaderMap) -> Response {
    if authenticate(&headers).is_none() {
        return unauthenticated();
    }
    let state = mock.state.read().unwrap();
    Json(state.requests.clone()).into_response()
}

async fn create_request(
    State(mock): State<Arc<MockService>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    if body["titulo"].as_str().unwrap_or_default().trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "title is required");
    }

    let mut state = mock.state.write().unwrap();
    state.next_request_id += 1;
    let request = json!({
        "id": state.next_request_id,
        "titulo": body["titulo"],
        "descricao": body["descricao"],
        "nome_solicitante": body["nome_solicitante"],
        "celular_solicitante": body["celular_solicitante"],
        "email_solicitante": body["email_solicitante"],
        "status": "Pendente",
        "data_submissao": "2026-03-01T12:00:00",
        "usuario_criador_id": user.id,
        "comentarios": []
    });
    state.requests.push(request.clone());
    (StatusCode::CREATED, Json(request)).into_response()
}

async fn get_request(State(mock): State<Arc<MockService>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if authenticate(&headers).is_none() {
        return unauthenticated();
    }
    let state = mock.state.read().unwrap();
    match state.requests.iter().find(|r| r["id"] == json!(id)) {
        Some(request) => Json(request.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "request not found"),
    }
}

async fn update_request(
    State(mock): State<Arc<MockService>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    let mut state = mock.state.write().unwrap();
    let Some(request) = state.requests.iter_mut().find(|r| r["id"] == json!(id)) else {
        return error(StatusCode::NOT_FOUND, "request not found");
    };
    if !user.is_admin && request["usuario_criador_id"] != json!(user.id) {
        return error(StatusCode::FORBIDDEN, "only the creator or an admin may edit");
    }

    for field in [
        "titulo",
        "descricao",
        "nome_solicitante",
        "celular_solicitante",
        "email_solicitante",
    ] {
        if !body[field].is_null() {
            request[field] = body[field].clone();
        }
    }
    Json(request.clone()).into_response()
}

async fn delete_request(State(mock): State<Arc<MockService>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    let mut state = mock.state.write().unwrap();
    let Some(position) = state.requests.iter().position(|r| r["id"] == json!(id)) else {
        return error(StatusCode::NOT_FOUND, "request not found");
    };
    if !user.is_admin && state.requests[position]["usuario_criador_id"] != json!(user.id) {
        return error(StatusCode::FORBIDDEN, "only the creator or an admin may delete");
    }

    state.requests.remove(position);
    Json(json!({ "message": "request deleted" })).into_response()
}

async fn update_status(
    State(mock): State<Arc<MockService>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    if !user.is_admin {
        return error(StatusCode::FORBIDDEN, "admin privileges required");
    }

    let status = body["status"].as_str().unwrap_or_default();
    if !["Pendente", "Em Oração", "Respondido", "Arquivado"].contains(&status) {
        return error(StatusCode::BAD_REQUEST, "unknown status");
    }

    let mut state = mock.state.write().unwrap();
    let Some(request) = state.requests.iter_mut().find(|r| r["id"] == json!(id)) else {
        return error(StatusCode::NOT_FOUND, "request not found");
    };
    request["status"] = json!(status);
    Json(request.clone()).into_response()
}

async fn statistics(State(mock): State<Arc<MockService>>, headers: HeaderMap) -> Response {
    if authenticate(&headers).is_none() {
        return unauthenticated();
    }
    let state = mock.state.read().unwrap();
    let count = |status: &str| {
        state
            .requests
            .iter()
            .filter(|r| r["status"] == json!(status))
            .count()
    };
    Json(json!({
        "total": state.requests.len(),
        "pendentes": count("Pendente"),
        "em_oracao": count("Em Oração"),
        "respondidos": count("Respondido"),
        "arquivados": count("Arquivado")
    }))
    .into_response()
}

async fn search(
    State(mock): State<Arc<MockService>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if authenticate(&headers).is_none() {
        return unauthenticated();
    }
    let term = params.get("q").map(|t| t.to_lowercase());
    let status = params.get("status");

    let state = mock.state.read().unwrap();
    let matches: Vec<Value> = state
        .requests
        .iter()
        .filter(|r| match status {
            Some(status) => r["status"] == json!(status),
            None => true,
        })
        .filter(|r| match &term {
            Some(term) => ["titulo", "descricao", "nome_solicitante"].iter().any(|field| {
                r[*field]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(term)
            }),
            None => true,
        })
        .cloned()
        .collect();
    Json(matches).into_response()
}

async fn add_comment(
    State(mock): State<Arc<MockService>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    let content = body["conteudo"].as_str().unwrap_or_default();
    if content.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "comment content is required");
    }

    let mut state = mock.state.write().unwrap();
    state.next_comment_id += 1;
    let comment = json!({
        "id": state.next_comment_id,
        "autor": user.username,
        "conteudo": content,
        "data_comentario": "2026-03-02T09:00:00"
    });
    let Some(request) = state.requests.iter_mut().find(|r| r["id"] == json!(id)) else {
        return error(StatusCode::NOT_FOUND, "request not found");
    };
    let Some(comments) = request["comentarios"].as_array_mut() else {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "corrupt request record");
    };
    comments.push(comment.clone());
    (StatusCode::CREATED, Json(comment)).into_response()
}

async fn list_comments(State(mock): State<Arc<MockService>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if authenticate(&headers).is_none() {
        return unauthenticated();
    }
    let state = mock.state.read().unwrap();
    match state.requests.iter().find(|r| r["id"] == json!(id)) {
        Some(request) => Json(request["comentarios"].clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "request not found"),
    }
}

async fn list_users(State(mock): State<Arc<MockService>>, headers: HeaderMap) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    if !user.is_admin {
        return error(StatusCode::FORBIDDEN, "admin privileges required");
    }
    let state = mock.state.read().unwrap();
    Json(state.users.clone()).into_response()
}

async fn toggle_admin(State(mock): State<Arc<MockService>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let Some(user) = authenticate(&headers) else {
        return unauthenticated();
    };
    if !user.is_admin {
        return error(StatusCode::FORBIDDEN, "admin privileges required");
    }
    let mut state = mock.state.write().unwrap();
    let Some(target) = state.users.iter_mut().find(|u| u["id"] == json!(id)) else {
        return error(StatusCode::NOT_FOUND, "user not found");
    };
    let flipped = !target["is_admin"].as_bool().unwrap_or(false);
    target["is_admin"] = json!(flipped);
    Json(target.clone()).into_response()
}

fn router(mock: Arc<MockService>) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/verify-token", get(verify_token))
        .route("/auth/users", get(list_users))
        .route("/auth/users/:id/admin", put(toggle_admin))
        .route("/pedidos", get(list_requests).post(create_request))
        .route("/pedidos/estatisticas", get(statistics))
        .route("/pedidos/buscar", get(search))
        .route(
            "/pedidos/:id",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/pedidos/:id/status", put(update_status))
        .route("/pedidos/:id/comentarios", get(list_comments).post(add_comment))
        .with_state(mock);

    Router::new().nest("/api", api)
}

/// A running mock service bound to an ephemeral local port.
pub struct TestService {
    addr: SocketAddr,
    mock: Arc<MockService>,
}

impl TestService {
    /// Base URL for clients, including the `/api` prefix.
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Inserts a request directly into the mock state, bypassing HTTP.
    pub fn seed_request(&self, title: &str, description: &str, requester: &str, status: &str) -> i64 {
        let mut state = self.mock.state.write().unwrap();
        state.next_request_id += 1;
        let id = state.next_request_id;
        state.requests.push(json!({
            "id": id,
            "titulo": title,
            "descricao": description,
            "nome_solicitante": requester,
            "celular_solicitante": null,
            "email_solicitante": null,
            "status": status,
            "data_submissao": "2026-02-20T08:00:00",
            "usuario_criador_id": 1,
            "comentarios": []
        }));
        id
    }

    /// Number of requests currently held by the mock.
    pub fn request_count(&self) -> usize {
        self.mock.state.read().unwrap().requests.len()
    }
}

/// Starts the mock service and returns a handle to drive it.
pub async fn spawn_service() -> TestService {
    let mock = Arc::new(MockService {
        state: RwLock::new(BoardState {
            requests: Vec::new(),
            users: vec![admin_user_json(), member_user_json()],
            next_request_id: 0,
            next_comment_id: 0,
        }),
    });

    let app = router(mock.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to read mock address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service crashed");
    });

    TestService { addr, mock }
}
