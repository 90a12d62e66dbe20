use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["service"], "autocare-backend");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_route_rejects_get() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // La ruta existe pero solo acepta POST
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_login_route_accepts_json_body() {
    let app = create_test_app();
    let payload = json!({
        "email": "admin@autocare.vn",
        "password": "super-secreta"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["received"], "admin@autocare.vn");
}

// App de test con la misma forma de rutas que el binario.
// Las rutas reales requieren PostgreSQL; aquí se verifica el cableado HTTP.
fn create_test_app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(echo_login))
}

async fn health() -> Json<Value> {
    Json(json!({
        "service": "autocare-backend",
        "status": "healthy",
    }))
}

async fn echo_login(Json(payload): Json<Value>) -> Json<Value> {
    Json(json!({ "received": payload["email"] }))
}
