// End-to-end home route resolution against an in-process preferences backend
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use femimed_dashboard::application::home_route_service::HomeRouteService;
use femimed_dashboard::domain::home::HomeRouteTable;
use femimed_dashboard::domain::role::{Role, User};
use femimed_dashboard::infrastructure::http_preferences_repository::HttpPreferencesRepository;
use femimed_dashboard::infrastructure::memory_route_cache::InMemoryRouteCache;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Backend {
    stored: Mutex<Option<String>>,
    gets: AtomicUsize,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer secret")
}

async fn read_preferences(
    headers: HeaderMap,
    State(backend): State<Arc<Backend>>,
) -> Result<Json<Value>, StatusCode> {
    backend.gets.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let stored = backend.stored.lock().unwrap().clone();
    Ok(Json(json!({"success": true, "data": {"pagina_principal": stored}})))
}

async fn write_preference(
    headers: HeaderMap,
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if body["key"] != "pagina_principal" {
        return Ok(Json(json!({"success": false, "message": "clave desconocida"})));
    }
    *backend.stored.lock().unwrap() = body["value"].as_str().map(str::to_string);
    Ok(Json(json!({"success": true})))
}

async fn spawn_backend(backend: Arc<Backend>) -> String {
    let router = Router::new()
        .route("/api/preferencias", get(read_preferences).put(write_preference))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn service(base_url: &str) -> HomeRouteService {
    let repository =
        HttpPreferencesRepository::new(base_url, Some(Duration::from_secs(5))).unwrap();
    HomeRouteService::new(
        Arc::new(repository),
        Arc::new(InMemoryRouteCache::new()),
        HomeRouteTable::default(),
        "pagina_principal",
    )
}

#[tokio::test]
async fn test_saved_route_is_resolved_once() {
    let backend = Arc::new(Backend::default());
    let base_url = spawn_backend(backend.clone()).await;
    let writer = service(&base_url);
    let user = User::new(21, Role::Doctor);

    assert!(
        writer
            .set_preferred_home_route(Some(&user), Some("secret"), "/admin/informes-medicos")
            .await
    );

    // A fresh service has an empty cache and must ask the backend.
    let reader = service(&base_url);
    let first = reader.preferred_home_route(Some(&user), Some("secret")).await;
    let second = reader.preferred_home_route(Some(&user), Some("secret")).await;
    assert_eq!(first, "/admin/informes-medicos");
    assert_eq!(second, first);
    assert_eq!(backend.gets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthorized_fetch_falls_back() {
    let backend = Arc::new(Backend::default());
    *backend.stored.lock().unwrap() = Some("/admin/pacientes".to_string());
    let base_url = spawn_backend(backend.clone()).await;
    let service = service(&base_url);

    let user = User::new(22, Role::Finance);
    let route = service.preferred_home_route(Some(&user), Some("wrong")).await;
    assert_eq!(route, "/admin/finanzas");
    assert!(
        !service
            .set_preferred_home_route(Some(&user), Some("wrong"), "/admin/dashboard")
            .await
    );
}

#[tokio::test]
async fn test_stale_preference_after_role_change() {
    let backend = Arc::new(Backend::default());
    *backend.stored.lock().unwrap() = Some("/admin/medicos".to_string());
    let base_url = spawn_backend(backend).await;
    let service = service(&base_url);

    // Doctors page was chosen as admin; the user is now a secretary.
    let user = User::new(23, Role::Secretary);
    let route = service.preferred_home_route(Some(&user), Some("secret")).await;
    assert_eq!(route, "/admin/dashboard");
}

#[tokio::test]
async fn test_unreachable_backend_never_errors() {
    // Nothing listens on the discard port.
    let service = service("http://127.0.0.1:9");
    let user = User::new(24, Role::Administrator);

    assert_eq!(
        service.preferred_home_route(Some(&user), Some("secret")).await,
        "/admin/dashboard"
    );
    assert!(
        !service
            .set_preferred_home_route(Some(&user), Some("secret"), "/admin/consultas")
            .await
    );
}

#[tokio::test]
async fn test_route_outside_allow_list_is_not_saved() {
    let backend = Arc::new(Backend::default());
    let base_url = spawn_backend(backend.clone()).await;
    let service = service(&base_url);
    let user = User::new(25, Role::Secretary);

    assert!(
        !service
            .set_preferred_home_route(Some(&user), Some("secret"), "/admin/finanzas")
            .await
    );
    assert_eq!(*backend.stored.lock().unwrap(), None);

    let route = service.preferred_home_route(Some(&user), Some("secret")).await;
    assert_eq!(route, "/admin/dashboard");
}
